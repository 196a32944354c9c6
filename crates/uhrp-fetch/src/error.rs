//! Error taxonomy surfaced to callers of the resolver.

use thiserror::Error;
use uhrp_address::AddressError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Terminal failure of a single resolution attempt.
///
/// Every variant names the requested input or address so callers can report
/// which content failed. None of them is fatal beyond the attempt.
#[derive(Debug, Error)]
pub enum UhrpError {
    #[error("invalid content address {input:?}: {source}")]
    InvalidAddressFormat {
        input:  String,
        #[source]
        source: AddressError,
    },

    #[error("host resolution failed for {address}: {source}")]
    ResolutionFailed {
        address: String,
        #[source]
        source:  BoxError,
    },

    #[error("no hosts available for {address}")]
    NoHostsAvailable { address: String },

    #[error("all {} candidate hosts failed for {address}", failures.len())]
    AllCandidatesExhausted {
        address:  String,
        failures: Vec<CandidateFailure>,
    },

    #[error("deadline exceeded while resolving {address}")]
    DeadlineExceeded { address: String },
}

impl UhrpError {
    /// Whether re-invoking later may succeed without changing the input.
    pub fn is_retryable(&self) -> bool { !matches!(self, UhrpError::InvalidAddressFormat { .. }) }

    /// The input or address the failed attempt was about.
    pub fn subject(&self) -> &str {
        match self {
            UhrpError::InvalidAddressFormat { input, .. } => input,
            UhrpError::ResolutionFailed { address, .. }
            | UhrpError::NoHostsAvailable { address }
            | UhrpError::AllCandidatesExhausted { address, .. }
            | UhrpError::DeadlineExceeded { address } => address,
        }
    }
}

/// Why one candidate host was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    #[error("content exceeds {limit} bytes")]
    TooLarge { limit: u64 },
}

/// A skipped candidate, kept for diagnostics on exhaustion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{url}: {reason}")]
pub struct CandidateFailure {
    pub url:    String,
    pub reason: FailureReason,
}
