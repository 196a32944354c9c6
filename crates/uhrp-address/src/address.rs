use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uhrp_verify::{DIGEST_LEN, Sha256Hasher};

use crate::AddressError;

/// URL scheme of content addresses. Matched case-insensitively.
pub const SCHEME: &str = "uhrp";

/// Version bytes prepended to the digest before Base58Check encoding.
pub const ADDRESS_PREFIX: [u8; 2] = [0xce, 0x00];

const SCHEME_PREFIX: &str = "uhrp:";

/// A digest-derived identifier for a piece of content.
///
/// Immutable once constructed. The bare Base58Check form is kept alongside the
/// digest because it doubles as the resolution cache key.
#[derive(Clone)]
pub struct ContentAddress {
    digest:  [u8; DIGEST_LEN],
    encoded: String,
}

impl ContentAddress {
    pub fn from_digest(digest: [u8; DIGEST_LEN]) -> Self {
        let mut payload = Vec::with_capacity(ADDRESS_PREFIX.len() + DIGEST_LEN);
        payload.extend_from_slice(&ADDRESS_PREFIX);
        payload.extend_from_slice(&digest);
        let encoded = bs58::encode(payload).with_check().into_string();
        Self { digest, encoded }
    }

    /// Address of `content`, hashing it with the same function used for verification.
    pub fn for_content(content: &[u8]) -> Self { Self::from_digest(Sha256Hasher::digest_array(content)) }

    pub fn digest(&self) -> &[u8; DIGEST_LEN] { &self.digest }

    /// Bare Base58Check form, without the scheme.
    pub fn encoded(&self) -> &str { &self.encoded }

    /// Whether `content` hashes to this address.
    pub fn matches(&self, content: &[u8]) -> bool {
        uhrp_verify::digests_match(&self.digest, &Sha256Hasher::digest_array(content))
    }
}

impl PartialEq for ContentAddress {
    fn eq(&self, other: &Self) -> bool { self.digest == other.digest }
}

impl Eq for ContentAddress {}

impl Hash for ContentAddress {
    fn hash<H: Hasher>(&self, state: &mut H) { self.digest.hash(state); }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}://{}", self.encoded)
    }
}

impl fmt::Debug for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContentAddress").field(&self.encoded).finish()
    }
}

impl FromStr for ContentAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { extract_address(s) }
}

impl Serialize for ContentAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        extract_address(&raw).map_err(serde::de::Error::custom)
    }
}

/// Whether `input` is a bare content address or a `uhrp:` URL wrapping one.
pub fn is_content_address(input: &str) -> bool { extract_address(input).is_ok() }

/// Parse a bare content address or a `uhrp:` URL.
pub fn extract_address(input: &str) -> Result<ContentAddress, AddressError> {
    let bare = strip_scheme(input);
    if bare.is_empty() {
        return Err(AddressError::Empty);
    }

    let payload = bs58::decode(bare)
        .with_check(None)
        .into_vec()
        .map_err(|e| AddressError::Encoding(e.to_string()))?;

    let Some(digest) = payload.strip_prefix(&ADDRESS_PREFIX[..]) else {
        let head = &payload[..payload.len().min(ADDRESS_PREFIX.len())];
        return Err(AddressError::Prefix(hex::encode(head)));
    };
    let digest: [u8; DIGEST_LEN] = digest
        .try_into()
        .map_err(|_| AddressError::DigestLength(digest.len()))?;

    Ok(ContentAddress {
        digest,
        encoded: bare.to_string(),
    })
}

/// Strips every leading `uhrp:` (any case), each optionally followed by `//`.
/// Nested prefixes collapse so `uhrp://X` is valid exactly when `X` is.
fn strip_scheme(mut input: &str) -> &str {
    while input
        .get(..SCHEME_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(SCHEME_PREFIX))
    {
        input = &input[SCHEME_PREFIX.len()..];
        input = input.strip_prefix("//").unwrap_or(input);
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContentAddress { ContentAddress::for_content(b"hello world") }

    #[test]
    fn construction_round_trips_through_extraction() {
        let address = sample();
        assert_eq!(extract_address(address.encoded()).unwrap(), address);
        assert_eq!(extract_address(&address.to_string()).unwrap(), address);
        assert_eq!(address.digest(), &Sha256Hasher::digest_array(b"hello world"));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let encoded = sample().encoded().to_string();
        for scheme in ["uhrp://", "UHRP://", "Uhrp://", "uHrP://", "uhrp:"] {
            assert!(is_content_address(&format!("{scheme}{encoded}")), "{scheme}");
        }
    }

    #[test]
    fn base58_payload_is_case_sensitive() {
        let encoded = sample().encoded().to_string();
        let flipped: String = encoded
            .chars()
            .map(|c| if c.is_ascii_lowercase() { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();
        assert!(!is_content_address(&flipped));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(extract_address(""), Err(AddressError::Empty));
        assert_eq!(extract_address("uhrp://"), Err(AddressError::Empty));
        assert!(matches!(extract_address("not-a-uhrp-thing"), Err(AddressError::Encoding(_))));
        assert!(!is_content_address("https://example.com/file.png"));
        assert!(!is_content_address("uhrp://0OIl"));
    }

    #[test]
    fn rejects_bad_checksum() {
        let mut encoded = sample().encoded().to_string();
        let last = encoded.pop().unwrap();
        encoded.push(if last == '1' { '2' } else { '1' });
        assert!(matches!(extract_address(&encoded), Err(AddressError::Encoding(_))));
    }

    #[test]
    fn rejects_wrong_prefix() {
        let mut payload = vec![0x00, 0x00];
        payload.extend_from_slice(&[7u8; DIGEST_LEN]);
        let encoded = bs58::encode(payload).with_check().into_string();
        assert_eq!(extract_address(&encoded), Err(AddressError::Prefix("0000".into())));
    }

    #[test]
    fn rejects_short_digest() {
        let mut payload = ADDRESS_PREFIX.to_vec();
        payload.extend_from_slice(&[7u8; 20]);
        let encoded = bs58::encode(payload).with_check().into_string();
        assert_eq!(extract_address(&encoded), Err(AddressError::DigestLength(20)));
    }

    #[test]
    fn equality_follows_digest() {
        let a = sample();
        let b = extract_address(&format!("UHRP://{}", a.encoded())).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, ContentAddress::for_content(b"other"));
    }

    #[test]
    fn matches_checks_content() {
        let address = sample();
        assert!(address.matches(b"hello world"));
        assert!(!address.matches(b"hello world!"));
    }

    #[test]
    fn serde_uses_url_form() {
        let address = sample();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{address}\""));
        let back: ContentAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
        assert!(serde_json::from_str::<ContentAddress>("\"nope\"").is_err());
    }
}
