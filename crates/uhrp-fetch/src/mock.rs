//! Mock transports shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use uhrp_address::ContentAddress;

use crate::data::TransportMetadata;
use crate::effects::{HostResolver, HttpClient, HttpResponse};

#[derive(Debug, thiserror::Error)]
#[error("mock transport: {0}")]
pub struct MockError(pub String);

#[derive(Debug, thiserror::Error)]
#[error("mock resolver unavailable")]
pub struct MockResolverError;

#[derive(Clone)]
enum Route {
    Respond {
        status:       u16,
        content_type: Option<String>,
        chunks:       Vec<Bytes>,
        delay:        Duration,
    },
    Fail,
}

/// HTTP client answering from a fixed routing table and counting requests.
#[derive(Default)]
pub struct MockHttpClient {
    routes:   Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<String>>,
}

impl MockHttpClient {
    pub fn new() -> Self { Self::default() }

    pub fn serve(self, url: &str, status: u16, body: &[u8]) -> Self { self.serve_typed(url, status, None, body) }

    pub fn serve_typed(self, url: &str, status: u16, content_type: Option<&str>, body: &[u8]) -> Self {
        self.set_route(url, Route::Respond {
            status,
            content_type: content_type.map(str::to_string),
            chunks: body.chunks(7).map(Bytes::copy_from_slice).collect(),
            delay: Duration::ZERO,
        });
        self
    }

    pub fn serve_slowly(self, url: &str, body: &[u8], delay: Duration) -> Self {
        self.set_route(url, Route::Respond {
            status: 200,
            content_type: None,
            chunks: vec![Bytes::copy_from_slice(body)],
            delay,
        });
        self
    }

    pub fn fail(self, url: &str) -> Self {
        self.set_route(url, Route::Fail);
        self
    }

    /// Replace the route for `url` after construction.
    pub fn set_route_body(&self, url: &str, status: u16, body: &[u8]) {
        self.set_route(url, Route::Respond {
            status,
            content_type: None,
            chunks: vec![Bytes::copy_from_slice(body)],
            delay: Duration::ZERO,
        });
    }

    fn set_route(&self, url: &str, route: Route) { self.routes.lock().insert(url.to_string(), route); }

    pub fn requests(&self) -> Vec<String> { self.requests.lock().clone() }

    pub fn request_count(&self) -> usize { self.requests.lock().len() }
}

impl HttpClient for MockHttpClient {
    type Error = MockError;

    async fn get(&self, url: &str) -> Result<HttpResponse<Self::Error>, Self::Error> {
        self.requests.lock().push(url.to_string());
        let route = self.routes.lock().get(url).cloned();

        match route {
            Some(Route::Respond {
                status,
                content_type,
                chunks,
                delay,
            }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let content_length = Some(chunks.iter().map(|c| c.len() as u64).sum());
                let body = futures_util::stream::iter(chunks.into_iter().map(Ok::<_, MockError>));
                Ok(HttpResponse {
                    status,
                    transport: TransportMetadata {
                        content_type,
                        content_length,
                        last_modified: None,
                    },
                    body: Box::pin(body),
                })
            }
            Some(Route::Fail) => Err(MockError(format!("connection refused: {url}"))),
            None => Err(MockError(format!("no route to {url}"))),
        }
    }
}

/// Resolver with mutable answers that counts lookups.
#[derive(Default)]
pub struct MockResolver {
    hosts:   Mutex<HashMap<String, Vec<String>>>,
    failing: bool,
    lookups: AtomicUsize,
}

impl MockResolver {
    pub fn new() -> Self { Self::default() }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_hosts<const N: usize>(self, address: &ContentAddress, urls: [&str; N]) -> Self {
        self.set_hosts(address, urls);
        self
    }

    pub fn set_hosts<const N: usize>(&self, address: &ContentAddress, urls: [&str; N]) {
        self.hosts.lock().insert(
            address.encoded().to_string(),
            urls.iter().map(|u| u.to_string()).collect(),
        );
    }

    pub fn lookups(&self) -> usize { self.lookups.load(Ordering::SeqCst) }
}

impl HostResolver for MockResolver {
    type Error = MockResolverError;

    async fn lookup(&self, address: &ContentAddress) -> Result<Vec<String>, Self::Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(MockResolverError);
        }
        Ok(self
            .hosts
            .lock()
            .get(address.encoded())
            .cloned()
            .unwrap_or_default())
    }
}
