//! Error type for API calls.

use thiserror::Error;

/// Failure of a single API operation (sign-in, snapshot listing).
///
/// Only `Transport` is produced after retries; the other variants are
/// application-level and surface on the first response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failed on every attempt.
    #[error("failed {operation} after {attempts} attempts: {source}")]
    Transport {
        operation: String,
        attempts: u32,
        #[source]
        source: curl::Error,
    },
    /// The request could not be built (bad URL, header, or body).
    #[error("{operation}: could not build request: {source}")]
    Request {
        operation: String,
        #[source]
        source: curl::Error,
    },
    /// Server answered with a status the operation does not accept.
    #[error("invalid response from {operation}: HTTP {status}")]
    Status {
        operation: String,
        status: u32,
        body: String,
    },
    /// Response body was not the JSON shape the operation expects.
    #[error("{operation}: malformed response body: {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
    /// Server answered 2xx but the envelope reports failure or lacks data.
    #[error("{operation} rejected: {message}")]
    Rejected { operation: String, message: String },
}
