use std::future::Future;

use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};
use uhrp_address::{ContentAddress, extract_address};
use uhrp_sniff::{detect_type, select_mime_type};

use crate::cache::{CachePolicy, ResolutionCache};
use crate::config::ResolverConfig;
use crate::data::{ResolveOptions, ResolvedContent};
use crate::effects::{HostResolver, HttpClient, VerifiedFetch, fetch_and_verify, fetch_candidate, resolve_hosts};
use crate::error::UhrpError;

/// Entry point for resolving `uhrp://` content.
///
/// Construct one per process and share it by reference or `Arc`; each call
/// is independent and calls may run concurrently. The only shared state is
/// the [`ResolutionCache`].
///
/// # Examples
///
/// ```no_run
/// use uhrp_fetch::{ContentAddress, ContentResolver, ReqwestClient, StaticResolver};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let hosts = StaticResolver::new().with_fallback(["https://cdn.example.com/content"]);
/// let resolver = ContentResolver::new(hosts, ReqwestClient::new()?);
///
/// let address = ContentAddress::for_content(b"hello world");
/// let content = resolver.resolve(&address.to_string()).await?;
/// println!("{} bytes of {}", content.byte_length, content.mime_type);
/// # Ok(())
/// # }
/// ```
pub struct ContentResolver<R, C> {
    resolver:          R,
    client:            C,
    cache:             ResolutionCache,
    max_content_bytes: Option<u64>,
}

impl<R: HostResolver, C: HttpClient> ContentResolver<R, C> {
    pub fn new(resolver: R, client: C) -> Self {
        Self {
            resolver,
            client,
            cache: ResolutionCache::default(),
            max_content_bytes: None,
        }
    }

    pub fn from_config(resolver: R, client: C, config: &ResolverConfig) -> Self {
        Self::new(resolver, client)
            .with_cache_policy(config.cache)
            .with_max_content_bytes(config.max_content_bytes)
    }

    #[must_use]
    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache = ResolutionCache::new(policy);
        self
    }

    #[must_use]
    pub fn with_max_content_bytes(mut self, limit: Option<u64>) -> Self {
        self.max_content_bytes = limit;
        self
    }

    pub fn cache(&self) -> &ResolutionCache { &self.cache }

    pub fn host_resolver(&self) -> &R { &self.resolver }

    pub fn http_client(&self) -> &C { &self.client }

    /// Resolve, fetch and verify the content named by `input`.
    pub async fn resolve(&self, input: &str) -> Result<ResolvedContent, UhrpError> {
        self.resolve_with(input, &ResolveOptions::default()).await
    }

    /// [`resolve`](Self::resolve) with per-call options.
    ///
    /// A previously verified URL is tried first; if it no longer serves
    /// matching bytes the entry is dropped and a full lookup follows.
    #[instrument(level = "debug", skip(self, options))]
    pub async fn resolve_with(&self, input: &str, options: &ResolveOptions) -> Result<ResolvedContent, UhrpError> {
        let address = parse_input(input)?;
        let (fetched, from_cache) = self.locate(&address, options.deadline).await?;

        let sniffed = detect_type(&fetched.bytes);
        let mime_type = select_mime_type(fetched.transport.content_type.as_deref(), sniffed);
        info!(%address, url = %fetched.url, %mime_type, from_cache, "resolved content");

        Ok(ResolvedContent {
            byte_length: fetched.bytes.len() as u64,
            address,
            bytes: fetched.bytes,
            mime_type,
            resolved_url: fetched.url,
            from_cache,
            transport: fetched.transport,
        })
    }

    /// First URL currently serving bytes that verify against `input`.
    ///
    /// Applies the same verification as [`resolve`](Self::resolve) but hands
    /// back only the location.
    pub async fn find_hosted_location(&self, input: &str) -> Result<String, UhrpError> {
        self.find_hosted_location_with(input, &ResolveOptions::default()).await
    }

    #[instrument(level = "debug", skip(self, options))]
    pub async fn find_hosted_location_with(&self, input: &str, options: &ResolveOptions) -> Result<String, UhrpError> {
        let address = parse_input(input)?;
        let (fetched, _) = self.locate(&address, options.deadline).await?;
        Ok(fetched.url)
    }

    /// Cached URL first, then lookup plus ordered verification.
    async fn locate(
        &self,
        address: &ContentAddress,
        deadline: Option<Instant>,
    ) -> Result<(VerifiedFetch, bool), UhrpError> {
        if let Some(url) = self.cache.get(address) {
            debug!(%address, %url, "cache hit");
            let attempt = fetch_candidate(&self.client, address, &url, self.max_content_bytes);
            match within(deadline, address, attempt).await? {
                Ok(fetched) => return Ok((fetched, true)),
                Err(reason) => {
                    warn!(%address, %url, %reason, "cached host no longer verifies");
                    self.cache.invalidate(address, &url);
                }
            }
        } else {
            debug!(%address, "cache miss");
        }

        let candidates = within(deadline, address, resolve_hosts(&self.resolver, address)).await??;
        let fetched = fetch_and_verify(
            &self.client,
            address,
            &candidates,
            self.max_content_bytes,
            deadline,
        )
        .await?;

        self.cache.insert(address, fetched.url.clone());
        Ok((fetched, false))
    }
}

fn parse_input(input: &str) -> Result<ContentAddress, UhrpError> {
    extract_address(input).map_err(|source| UhrpError::InvalidAddressFormat {
        input: input.to_string(),
        source,
    })
}

/// Run `fut` under an optional deadline.
async fn within<F: Future>(deadline: Option<Instant>, address: &ContentAddress, fut: F) -> Result<F::Output, UhrpError> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, fut)
            .await
            .map_err(|_| UhrpError::DeadlineExceeded {
                address: address.to_string(),
            }),
        None => Ok(fut.await),
    }
}
