//! Codec for `uhrp://` content addresses.
//!
//! A content address is the Base58Check encoding of a two-byte UHRP prefix
//! followed by the SHA-256 digest of the content. It names bytes, not a
//! location: two addresses are equal exactly when they carry the same digest.
//!
//! Everything here is pure. Validity is a decidable predicate over the input
//! string and never touches the network.
//!
//! ```
//! use uhrp_address::{ContentAddress, is_content_address};
//!
//! let address = ContentAddress::for_content(b"hello world");
//! let url = address.to_string();
//!
//! assert!(url.starts_with("uhrp://"));
//! assert!(is_content_address(&url));
//! assert!(is_content_address(address.encoded()));
//! assert_eq!(url.parse::<ContentAddress>().unwrap(), address);
//! ```

mod address;
mod error;

pub use address::{ADDRESS_PREFIX, ContentAddress, SCHEME, extract_address, is_content_address};
pub use error::AddressError;
