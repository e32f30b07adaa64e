//! Rate-limit retry policy.
//!
//! The platform uses 429 purely as flow control with a self-describing
//! cooldown; every other status is a caller or server fault that retrying
//! cannot fix. A 429 is therefore the only retryable error, and the wait is
//! whatever the server suggested, clamped.

use crate::error::RestError;
use std::time::Duration;

/// Retry policy applied by `RestSession` around each request.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Wait when the 429 carries no `Retry-After` header.
    pub default_delay: Duration,
    /// Ceiling on the per-attempt wait, whatever the server suggests.
    pub max_delay: Duration,
    /// Upper bound on 429 retries before the error is surfaced.
    ///
    /// The platform contract would allow retrying indefinitely; a bound
    /// keeps a sustained throttle from turning into an infinite loop.
    pub max_429_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            default_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(20),
            max_429_retries: 10,
        }
    }
}

impl RetryPolicy {
    /// Decide whether another attempt should be scheduled.
    pub(crate) fn should_retry(&self, err: &RestError, attempt: u32) -> bool {
        if attempt >= self.max_429_retries {
            return false;
        }
        err.status_code() == Some(429)
    }

    /// Wait before the next attempt: `min(Retry-After, max)`, default when
    /// the header is absent.
    pub(crate) fn delay_for(&self, err: &RestError) -> Duration {
        err.retry_after_secs()
            .map(Duration::from_secs)
            .unwrap_or(self.default_delay)
            .min(self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16, retry_after_secs: Option<u64>) -> RestError {
        RestError::status(code, "", retry_after_secs)
    }

    #[test]
    fn only_429_is_retryable() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(&status(429, None), 0));
        for code in [400, 401, 403, 404, 500, 502, 503] {
            assert!(!policy.should_retry(&status(code, None), 0));
        }
        assert!(!policy.should_retry(&RestError::InvalidBody("x".into()), 0));
    }

    #[test]
    fn retries_are_bounded() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(&status(429, None), 9));
        assert!(!policy.should_retry(&status(429, None), 10));
        assert!(!policy.should_retry(&status(429, None), 11));
    }

    // Suggested delay is clamped to 20s; absence defaults to 5s.
    #[test]
    fn delay_is_suggested_and_clamped() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.delay_for(&status(429, Some(100))),
            Duration::from_secs(20)
        );
        assert_eq!(
            policy.delay_for(&status(429, Some(3))),
            Duration::from_secs(3)
        );
        assert_eq!(policy.delay_for(&status(429, None)), Duration::from_secs(5));
    }
}
