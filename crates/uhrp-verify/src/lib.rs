//! Digest primitives for content-addressed payloads.
//!
//! UHRP addresses are derived from the SHA-256 digest of the content they
//! name. This crate provides the incremental hashing used to check fetched
//! bytes against that digest without a second pass over the data.
//!
//! # Key Features
//!
//! - **Incremental**: digests are computed as chunks stream in
//! - **Single-pass**: `VerifiedReader` hashes while the caller copies
//! - **Extensible**: the minimal `Hasher` trait admits other digests
//!
//! # Example
//!
//! ```
//! use uhrp_verify::{Sha256Hasher, VerifiedReader};
//!
//! let data = b"hello world";
//! let expected = Sha256Hasher::digest(data);
//!
//! let mut reader = VerifiedReader::new(&data[..], Sha256Hasher::new());
//! let mut buffer = Vec::new();
//! std::io::copy(&mut reader, &mut buffer).unwrap();
//!
//! assert_eq!(reader.finish(&expected).unwrap(), 11);
//! ```

pub use self::error::{Result, VerificationError};
pub use self::hasher::{DIGEST_LEN, Hasher, Sha256Hasher, digests_match};
pub use self::reader::{VerifiedReader, verify_stream};

mod error;
mod hasher;
mod reader;
