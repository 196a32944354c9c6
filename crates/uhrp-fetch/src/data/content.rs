use bytes::Bytes;
use serde::Serialize;
use uhrp_address::ContentAddress;

/// A URL a resolver claims serves some content. Unverified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateHost {
    pub url:  String,
    /// Position in the resolver's answer, 0 first.
    pub rank: usize,
}

/// Headers the serving host advertised. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransportMetadata {
    pub content_type:   Option<String>,
    pub content_length: Option<u64>,
    pub last_modified:  Option<String>,
}

/// Content whose digest matched the requested address.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedContent {
    pub address:      ContentAddress,
    #[serde(skip)]
    pub bytes:        Bytes,
    pub mime_type:    String,
    pub byte_length:  u64,
    pub resolved_url: String,
    /// Served from the previously verified URL without a fresh lookup.
    pub from_cache:   bool,
    pub transport:    TransportMetadata,
}
