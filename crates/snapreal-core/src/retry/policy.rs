use std::time::Duration;

/// Classification of a failed attempt for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Network-level failure (connection reset, DNS, etc.).
    Connection,
    /// Any other transport failure libcurl reports (TLS, protocol, ...).
    Other,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry; surface the error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Fixed-delay retry policy.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first). 0 behaves like 1.
    pub max_attempts: u32,
    /// Delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Effective attempt budget (never below one).
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// `attempt` is 1-based (1 = first attempt). Every transport failure kind is
    /// retried while attempts remain.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.attempts() {
            return RetryDecision::NoRetry;
        }
        match kind {
            ErrorKind::Timeout | ErrorKind::Connection | ErrorKind::Other => {
                RetryDecision::RetryAfter(self.delay)
            }
        }
    }
}
