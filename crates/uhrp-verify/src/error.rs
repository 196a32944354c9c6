use std::io;

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    /// The content hashed to something other than the requested digest.
    #[error("digest mismatch after {len} bytes: expected {}, got {}", hex::encode(.expected), hex::encode(.actual))]
    Mismatch {
        expected: Vec<u8>,
        actual:   Vec<u8>,
        len:      u64,
    },

    #[error("reading content: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, VerificationError>;
