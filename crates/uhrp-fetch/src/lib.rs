//! Resolution and verified retrieval of `uhrp://` content.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable result and option types
//! - [`classify`] - Pure decisions (status classification, candidate filtering)
//! - [`effects`] - I/O behind the [`HttpClient`] and [`HostResolver`] traits
//!
//! [`ContentResolver`] ties them together with the [`ResolutionCache`].
//!
//! # Key Properties
//!
//! - **Integrity boundary**: no bytes reach a caller unless their SHA-256
//!   digest equals the one embedded in the requested address
//! - **Continue-on-error**: a failing or lying host never blocks an honest one
//!   later in the candidate list
//! - **Sniffed media types**: a generic server `Content-Type` yields to the
//!   type detected from the bytes themselves

pub mod cache;
pub mod config;
pub mod classify;
pub mod data;
pub mod effects;
mod error;
mod facade;

#[cfg(test)]
mod mock;

pub use cache::{CachePolicy, ResolutionCache};
pub use config::{ConfigError, ResolverConfig};
pub use data::{CandidateHost, ResolveOptions, ResolvedContent, TransportMetadata};
pub use effects::{BoxStream, HostResolver, HttpClient, HttpResponse, StaticResolver, VerifiedFetch};
pub use error::{BoxError, CandidateFailure, FailureReason, UhrpError};
pub use facade::ContentResolver;
pub use uhrp_address::{ContentAddress, extract_address, is_content_address};
pub use uhrp_sniff::{MimeType, detect_type};

#[cfg(feature = "reqwest")]
pub use effects::{LookupError, LookupResolver, ReqwestClient};
