use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

use crate::data::TransportMetadata;

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Status, advertised metadata and streaming body of a GET.
pub struct HttpResponse<E> {
    pub status:    u16,
    pub transport: TransportMetadata,
    pub body:      BoxStream<'static, Result<Bytes, E>>,
}

/// Asynchronous HTTP client abstraction.
///
/// This trait provides the minimal interface the verifier needs.
/// Implementations handle their own redirect following and timeouts.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET for `url`.
    ///
    /// A response with an error status is still `Ok`; only failures to get
    /// any response at all (DNS, connect, TLS, timeout) are errors.
    fn get(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<HttpResponse<Self::Error>, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, LAST_MODIFIED};

    use super::*;
    use crate::config::ResolverConfig;

    /// Production HTTP client implementation using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient with default configuration.
        pub fn new() -> Result<Self, reqwest::Error> { Self::from_config(&ResolverConfig::default()) }

        pub fn from_config(config: &ResolverConfig) -> Result<Self, reqwest::Error> {
            let client = reqwest::Client::builder()
                .timeout(config.timeout)
                .user_agent(config.user_agent.as_str())
                .build()?;
            Ok(Self { client })
        }

        /// Wrap an existing client, sharing its connection pool.
        pub fn with_client(client: reqwest::Client) -> Self { Self { client } }

        pub fn inner(&self) -> &reqwest::Client { &self.client }
    }

    fn header_str(headers: &HeaderMap, name: reqwest::header::HeaderName) -> Option<String> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    fn transport_metadata(headers: &HeaderMap) -> TransportMetadata {
        TransportMetadata {
            content_type:   header_str(headers, CONTENT_TYPE),
            content_length: header_str(headers, CONTENT_LENGTH).and_then(|s| s.trim().parse().ok()),
            last_modified:  header_str(headers, LAST_MODIFIED),
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(&self, url: &str) -> Result<HttpResponse<Self::Error>, Self::Error> {
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let transport = transport_metadata(response.headers());
            let body = response.bytes_stream();

            Ok(HttpResponse {
                status,
                transport,
                body: Box::pin(body),
            })
        }
    }

}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
