//! Pure decisions used by the verifier and resolver wrappers.

use url::Url;

/// Returns `true` if a candidate's HTTP status lets its body be verified.
///
/// Anything below 400 is accepted, including redirects the client did not
/// follow; the digest check decides whether the body is usable.
///
/// # Examples
///
/// ```
/// use uhrp_fetch::classify::is_success_status;
///
/// assert!(is_success_status(200));
/// assert!(is_success_status(304));
/// assert!(!is_success_status(404));
/// assert!(!is_success_status(500));
/// ```
pub fn is_success_status(status: u16) -> bool { status < 400 }

/// Normalise a resolver answer into a fetchable URL.
///
/// Only absolute `http` and `https` URLs qualify.
pub fn candidate_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Some(url.into()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_boundary() {
        assert!(is_success_status(200));
        assert!(is_success_status(206));
        assert!(is_success_status(399));
        assert!(!is_success_status(400));
        assert!(!is_success_status(403));
        assert!(!is_success_status(503));
    }

    #[test]
    fn candidate_urls_must_be_http() {
        assert_eq!(
            candidate_url("https://cdn.example.com/abc").as_deref(),
            Some("https://cdn.example.com/abc")
        );
        assert_eq!(candidate_url(" http://host:8080/x ").as_deref(), Some("http://host:8080/x"));
        assert_eq!(candidate_url("ftp://host/file"), None);
        assert_eq!(candidate_url("uhrp://abc"), None);
        assert_eq!(candidate_url("/relative/path"), None);
        assert_eq!(candidate_url(""), None);
    }
}
