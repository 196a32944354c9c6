use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;

use tracing::{debug, warn};
use uhrp_address::ContentAddress;

use crate::classify::candidate_url;
use crate::data::CandidateHost;
use crate::error::UhrpError;

/// Backend mapping a content address to URLs claiming to host it.
pub trait HostResolver: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Raw candidate URLs in the backend's preferred order.
    fn lookup(
        &self,
        address: &ContentAddress,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;
}

/// Query `resolver` and turn its answer into ranked candidates.
///
/// Order is preserved and nothing is retried or cached here. Answers that are
/// not absolute http(s) URLs are dropped; if nothing usable remains the
/// result is `NoHostsAvailable`.
pub async fn resolve_hosts<R: HostResolver>(
    resolver: &R,
    address: &ContentAddress,
) -> Result<Vec<CandidateHost>, UhrpError> {
    let raw = resolver
        .lookup(address)
        .await
        .map_err(|e| UhrpError::ResolutionFailed {
            address: address.to_string(),
            source:  Box::new(e),
        })?;

    let candidates: Vec<CandidateHost> = raw
        .iter()
        .filter_map(|entry| {
            let url = candidate_url(entry);
            if url.is_none() {
                warn!(%address, candidate = %entry, "ignoring non-http candidate");
            }
            url
        })
        .enumerate()
        .map(|(rank, url)| CandidateHost { url, rank })
        .collect();

    if candidates.is_empty() {
        return Err(UhrpError::NoHostsAvailable {
            address: address.to_string(),
        });
    }

    debug!(%address, count = candidates.len(), "resolved candidate hosts");
    Ok(candidates)
}

/// In-memory resolver with fixed answers.
///
/// Addresses without an explicit entry get the fallback list, which may be
/// empty.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    hosts:    HashMap<String, Vec<String>>,
    fallback: Vec<String>,
}

impl StaticResolver {
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_hosts<I, S>(mut self, address: &ContentAddress, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts
            .insert(address.encoded().to_string(), urls.into_iter().map(Into::into).collect());
        self
    }

    /// URLs offered for every address without an explicit entry.
    #[must_use]
    pub fn with_fallback<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback = urls.into_iter().map(Into::into).collect();
        self
    }
}

impl HostResolver for StaticResolver {
    type Error = Infallible;

    async fn lookup(&self, address: &ContentAddress) -> Result<Vec<String>, Self::Error> {
        Ok(self
            .hosts
            .get(address.encoded())
            .unwrap_or(&self.fallback)
            .clone())
    }
}

#[cfg(feature = "reqwest")]
mod lookup {
    use serde::{Deserialize, Serialize};
    use url::Url;

    use super::*;
    use crate::config::ResolverConfig;

    /// Overlay service name answering UHRP host queries.
    pub const LOOKUP_SERVICE: &str = "ls_uhrp";

    #[derive(Debug, thiserror::Error)]
    pub enum LookupError {
        #[error("lookup request failed: {0}")]
        Http(#[source] reqwest::Error),

        #[error("lookup service answered {status}: {body}")]
        Status { status: u16, body: String },

        #[error("undecodable lookup answer: {0}")]
        Decode(#[source] reqwest::Error),
    }

    #[derive(Debug, Serialize)]
    struct LookupRequest<'a> {
        service: &'a str,
        query:   LookupQuery,
    }

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct LookupQuery {
        uhrp_url: String,
    }

    #[derive(Debug, Deserialize)]
    struct LookupAnswer {
        #[serde(default)]
        hosts: Vec<String>,
    }

    /// Resolver backed by an HTTP lookup service.
    ///
    /// Calls `POST {endpoint}/lookup` with
    /// `{"service":"ls_uhrp","query":{"uhrpUrl":"uhrp://..."}}` and expects
    /// `{"hosts":[...]}` in return.
    #[derive(Debug, Clone)]
    pub struct LookupResolver {
        http:     reqwest::Client,
        endpoint: Url,
    }

    impl LookupResolver {
        pub fn new(http: reqwest::Client, endpoint: Url) -> Self { Self { http, endpoint } }

        pub fn from_config(config: &ResolverConfig, endpoint: Url) -> Result<Self, reqwest::Error> {
            let http = reqwest::Client::builder()
                .timeout(config.timeout)
                .user_agent(config.user_agent.as_str())
                .build()?;
            Ok(Self::new(http, endpoint))
        }

        pub fn endpoint(&self) -> &Url { &self.endpoint }

        fn lookup_url(&self) -> String { format!("{}/lookup", self.endpoint.as_str().trim_end_matches('/')) }
    }

    impl HostResolver for LookupResolver {
        type Error = LookupError;

        async fn lookup(&self, address: &ContentAddress) -> Result<Vec<String>, Self::Error> {
            let request = LookupRequest {
                service: LOOKUP_SERVICE,
                query:   LookupQuery {
                    uhrp_url: address.to_string(),
                },
            };

            let resp = self
                .http
                .post(self.lookup_url())
                .json(&request)
                .send()
                .await
                .map_err(LookupError::Http)?;

            if !resp.status().is_success() {
                let status = resp.status().as_u16();
                let body = resp.text().await.unwrap_or_default();
                return Err(LookupError::Status { status, body });
            }

            let answer: LookupAnswer = resp.json().await.map_err(LookupError::Decode)?;
            Ok(answer.hosts)
        }
    }

}

#[cfg(feature = "reqwest")]
pub use lookup::{LookupError, LookupResolver};
