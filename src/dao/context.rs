//! Deadline-bound call context shared by the calls of one batch.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::error::BrowseError;

/// Execution context handed to every accessor call.
///
/// Carries one deadline and one cancellation token. Dropping the context
/// cancels the token, so anything still waiting on it is released when the
/// owning scope ends.
#[derive(Debug)]
pub struct CallContext {
    deadline: Option<Instant>,
    token: CancellationToken,
}

impl CallContext {
    /// Context without a deadline. Only cancellation ends it.
    pub fn background() -> Self {
        Self {
            deadline: None,
            token: CancellationToken::new(),
        }
    }

    /// Context whose deadline is `timeout` from now. A timeout too large
    /// to represent as an instant means no deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            token: CancellationToken::new(),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Token that async accessors can select on.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Why the context is done, if it is.
    pub fn err(&self) -> Option<BrowseError> {
        if self.remaining() == Some(Duration::ZERO) {
            return Some(BrowseError::Timeout);
        }
        if self.token.is_cancelled() {
            return Some(BrowseError::Cancelled);
        }
        None
    }

    /// `Ok` while the context is still live.
    pub fn check(&self) -> Result<(), BrowseError> {
        match self.err() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Block for `dur`, cut short by the deadline.
    ///
    /// Fails with the context error when the deadline elapses first.
    pub fn wait(&self, dur: Duration) -> Result<(), BrowseError> {
        self.check()?;
        let budget = match self.remaining() {
            Some(left) => dur.min(left),
            None => dur,
        };
        std::thread::sleep(budget);
        if budget < dur {
            return Err(BrowseError::Timeout);
        }
        self.check()
    }
}

impl Drop for CallContext {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_is_live() {
        let ctx = CallContext::with_timeout(Duration::from_secs(5));
        assert!(ctx.check().is_ok());
        assert!(ctx.remaining().unwrap() <= Duration::from_secs(5));
    }

    #[test]
    fn huge_timeout_is_unbounded() {
        let ctx = CallContext::with_timeout(Duration::MAX);
        assert!(ctx.deadline().is_none());
        assert!(ctx.check().is_ok());
    }

    #[test]
    fn background_context_has_no_deadline() {
        let ctx = CallContext::background();
        assert!(ctx.deadline().is_none());
        assert!(ctx.remaining().is_none());
        assert!(ctx.err().is_none());
    }

    #[test]
    fn elapsed_deadline_reports_timeout() {
        let ctx = CallContext::with_timeout(Duration::ZERO);
        assert!(matches!(ctx.err(), Some(BrowseError::Timeout)));
    }

    #[test]
    fn cancel_reports_cancelled() {
        let ctx = CallContext::background();
        ctx.cancel();
        assert!(matches!(ctx.check(), Err(BrowseError::Cancelled)));
    }

    #[test]
    fn drop_cancels_token() {
        let ctx = CallContext::with_timeout(Duration::from_secs(60));
        let token = ctx.token().clone();
        assert!(!token.is_cancelled());
        drop(ctx);
        assert!(token.is_cancelled());
    }

    #[test]
    fn wait_past_deadline_times_out() {
        let ctx = CallContext::with_timeout(Duration::from_millis(20));
        let res = ctx.wait(Duration::from_millis(500));
        assert!(matches!(res, Err(BrowseError::Timeout)));
    }

    #[test]
    fn short_wait_succeeds() {
        let ctx = CallContext::with_timeout(Duration::from_secs(5));
        assert!(ctx.wait(Duration::from_millis(1)).is_ok());
    }
}
