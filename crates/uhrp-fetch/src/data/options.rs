use std::time::Duration;

use tokio::time::Instant;

/// Per-call options for [`ContentResolver`](crate::ContentResolver).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use uhrp_fetch::ResolveOptions;
///
/// let options = ResolveOptions::default().timeout(Duration::from_secs(10));
/// assert!(options.deadline.is_some());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Instant after which no further candidate is contacted.
    ///
    /// The lookup and every candidate fetch run under this deadline. Once it
    /// passes, the attempt fails with `DeadlineExceeded` instead of moving on
    /// to the next candidate.
    ///
    /// Default: None
    pub deadline: Option<Instant>,
}

impl ResolveOptions {
    #[must_use]
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline relative to now.
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self { self.deadline(Instant::now() + timeout) }
}
