use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("empty content address")]
    Empty,

    #[error("not a Base58Check string: {0}")]
    Encoding(String),

    #[error("unexpected address prefix {0}")]
    Prefix(String),

    #[error("digest must be 32 bytes, got {0}")]
    DigestLength(usize),
}
