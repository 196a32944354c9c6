//! Media type detection from raw bytes.
//!
//! Servers hosting content-addressed data are untrusted, including their
//! `Content-Type` headers. [`detect_type`] classifies a buffer from its
//! leading byte signature and a short textual probe, and
//! [`select_mime_type`] decides when that classification overrides the
//! server's claim.

mod detect;
mod mime;

pub use detect::{SAMPLE_LEN, detect_type};
pub use mime::{MimeType, select_mime_type};
