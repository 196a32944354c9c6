//! I/O operations behind trait abstractions.
//!
//! Network access is confined to two seams: [`HttpClient`] for fetching
//! candidate bodies and [`HostResolver`] for mapping an address to candidate
//! URLs. Everything else in the crate is a pure function of their results.

mod http;
mod resolver;
mod verifier;

pub use http::{BoxStream, HttpClient, HttpResponse};
pub use resolver::{HostResolver, StaticResolver, resolve_hosts};
pub use verifier::{VerifiedFetch, fetch_and_verify, fetch_candidate};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
#[cfg(feature = "reqwest")]
pub use resolver::{LookupError, LookupResolver};
