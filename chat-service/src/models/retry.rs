//! Caller-driven retry bookkeeping.
//!
//! The server never retries on its own. It only tells the caller, based on the
//! `retry_count` the caller sent, whether another attempt is worthwhile.

use std::fmt;

/// Attempts a caller may make before being told to stop.
pub const MAX_RETRIES: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: i64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_RETRIES)
    }
}

/// What to tell the caller after an upstream failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryDecision {
    pub can_retry: bool,
    pub message: String,
}

impl fmt::Display for RetryDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl RetryPolicy {
    pub const fn new(max_retries: i64) -> Self {
        Self { max_retries }
    }

    pub fn can_retry(&self, retry_count: i64) -> bool {
        retry_count < self.max_retries
    }

    pub fn decide(&self, retry_count: i64, cause: &str) -> RetryDecision {
        if self.can_retry(retry_count) {
            RetryDecision {
                can_retry: true,
                message: format!(
                    "Connection failed: {}. (Attempt {} of {})",
                    cause,
                    retry_count + 1,
                    self.max_retries
                ),
            }
        } else {
            RetryDecision {
                can_retry: false,
                message: format!("Max retries exhausted. Technical details: {}", cause),
            }
        }
    }
}
