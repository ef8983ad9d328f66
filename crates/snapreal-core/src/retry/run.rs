//! Retry loop: run a transport attempt until success or the policy says stop.

use super::classify::classify_curl_error;
use super::policy::{RetryDecision, RetryPolicy};
use crate::http::ApiError;

/// Runs `f` until it returns Ok or the attempt budget is spent.
/// On a transport failure, sleeps for the policy delay then tries again.
/// After the last failed attempt, returns `ApiError::Transport` naming
/// `operation` and the number of attempts made.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, operation: &str, mut f: F) -> Result<T, ApiError>
where
    F: FnMut() -> Result<T, curl::Error>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify_curl_error(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => {
                        return Err(ApiError::Transport {
                            operation: operation.to_string(),
                            attempts: attempt,
                            source: e,
                        });
                    }
                    RetryDecision::RetryAfter(d) => {
                        tracing::warn!(
                            operation,
                            attempt,
                            ?kind,
                            "transport failure: {}; retrying in {:?}",
                            e,
                            d
                        );
                        std::thread::sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}
