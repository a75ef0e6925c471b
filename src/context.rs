//! Per-request cancellation and deadline

use std::time::{Duration, Instant};

use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Why a request stopped before completing
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    #[error("request is canceled")]
    Canceled,
    #[error("deadline is exceeded")]
    DeadlineExceeded,
}

/// Cancellation signal carried by one request.
///
/// Clones share the same token, so cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that expires `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_canceled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline_exceeded(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// `Ok` while the request should keep going. Cancellation wins over an expired deadline.
    pub fn check(&self) -> Result<(), Interrupted> {
        if self.is_canceled() {
            Err(Interrupted::Canceled)
        } else if self.deadline_exceeded() {
            Err(Interrupted::DeadlineExceeded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context_is_live() {
        let ctx = RequestContext::new();
        assert_eq!(ctx.check(), Ok(()));
        assert!(ctx.deadline().is_none());
    }

    #[test]
    fn test_cancel_propagates_to_clones() {
        let ctx = RequestContext::new();
        let clone = ctx.clone();
        ctx.cancel();
        assert_eq!(clone.check(), Err(Interrupted::Canceled));
    }

    #[test]
    fn test_deadline() {
        let ctx = RequestContext::new().with_deadline(Instant::now());
        assert_eq!(ctx.check(), Err(Interrupted::DeadlineExceeded));

        let ctx = RequestContext::with_timeout(Duration::from_secs(60));
        assert_eq!(ctx.check(), Ok(()));
    }

    #[test]
    fn test_cancel_wins_over_deadline() {
        let ctx = RequestContext::new().with_deadline(Instant::now());
        ctx.cancel();
        assert_eq!(ctx.check(), Err(Interrupted::Canceled));
    }
}
