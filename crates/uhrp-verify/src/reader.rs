use std::io::{self, Read};

use crate::{Hasher, Result, Sha256Hasher, VerificationError};

/// `Read` adapter that feeds every byte it yields into a hasher.
///
/// Drain it, then call [`finish`](Self::finish) to compare the digest of
/// everything read against the expected one.
pub struct VerifiedReader<R, H> {
    inner:  R,
    hasher: H,
    len:    u64,
}

impl<R, H> VerifiedReader<R, H> {
    pub fn new(inner: R, hasher: H) -> Self { Self { inner, hasher, len: 0 } }

    pub fn bytes_read(&self) -> u64 { self.len }
}

impl<R: Read, H: Hasher> Read for VerifiedReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        self.len += n as u64;
        Ok(n)
    }
}

impl<R, H: Hasher> VerifiedReader<R, H> {
    /// Compare against `expected`, returning the number of bytes verified.
    pub fn finish(self, expected: &[u8]) -> Result<u64> {
        let actual = self.hasher.finalize();
        if actual != expected {
            return Err(VerificationError::Mismatch {
                expected: expected.to_vec(),
                actual,
                len: self.len,
            });
        }
        Ok(self.len)
    }
}

/// Drain `source` and check its SHA-256 digest against `expected`.
pub fn verify_stream<R: Read>(source: R, expected: &[u8]) -> Result<u64> {
    let mut reader = VerifiedReader::new(source, Sha256Hasher::new());
    io::copy(&mut reader, &mut io::sink())?;
    reader.finish(expected)
}
