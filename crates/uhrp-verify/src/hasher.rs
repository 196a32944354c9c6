use sha2::{Digest, Sha256};

/// Length in bytes of the SHA-256 digest embedded in every content address.
pub const DIGEST_LEN: usize = 32;

pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Vec<u8>;
}

#[derive(Clone)]
pub struct Sha256Hasher(Sha256);

impl Hasher for Sha256Hasher {
    fn update(&mut self, data: &[u8]) { self.0.update(data); }
    fn finalize(self) -> Vec<u8> { self.0.finalize().to_vec() }
}

impl Default for Sha256Hasher {
    fn default() -> Self { Self::new() }
}

impl Sha256Hasher {
    pub fn new() -> Self { Self(Sha256::new()) }

    pub fn digest(data: &[u8]) -> Vec<u8> { Sha256::digest(data).to_vec() }

    /// One-shot digest as a fixed-size array.
    pub fn digest_array(data: &[u8]) -> [u8; DIGEST_LEN] { Sha256::digest(data).into() }

    /// Finalize into a fixed-size array.
    pub fn finalize_array(self) -> [u8; DIGEST_LEN] { self.0.finalize().into() }
}

/// Byte-for-byte digest comparison.
pub fn digests_match(expected: &[u8], actual: &[u8]) -> bool { expected == actual }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incremental_matches_one_shot() {
        let mut hasher = Sha256Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        assert_eq!(hasher.finalize(), Sha256Hasher::digest(b"hello world"));
    }

    #[test]
    fn known_vector() {
        let expected =
            hex::decode("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9")
                .unwrap();
        assert_eq!(Sha256Hasher::digest_array(b"hello world").to_vec(), expected);
    }

    #[test]
    fn digests_match_is_exact() {
        let a = Sha256Hasher::digest(b"a");
        let b = Sha256Hasher::digest(b"b");
        assert!(digests_match(&a, &a));
        assert!(!digests_match(&a, &b));
        assert!(!digests_match(&a, &a[..31]));
    }
}
