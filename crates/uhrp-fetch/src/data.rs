//! Immutable data types shared by the resolver, verifier and facade.

mod content;
mod options;

pub use content::{CandidateHost, ResolvedContent, TransportMetadata};
pub use options::ResolveOptions;
