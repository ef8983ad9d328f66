//! Retry policy for HTTP calls.
//!
//! Only transport-level failures (connection refused, DNS, timeouts, resets)
//! are retried, with a fixed delay between attempts. HTTP status codes are
//! returned to the caller untouched.

mod classify;
mod policy;
mod run;

pub use classify::classify_curl_error;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
