//! Sign-in: exchange email/password for a bearer token.

use serde::Deserialize;
use std::fmt;

use crate::http::{ApiError, HttpClient, HttpRequest, HttpResponse};

const OPERATION: &str = "sign_in";

/// User credentials, used once at start of a run.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct SignInEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: Option<SignInResult>,
}

#[derive(Debug, Deserialize)]
struct SignInResult {
    #[serde(default)]
    token: Option<String>,
}

/// POSTs `{email, password}` to `login_url` and returns the session token.
pub fn sign_in(
    client: &HttpClient,
    login_url: &str,
    credentials: &Credentials,
) -> Result<String, ApiError> {
    let payload = serde_json::json!({
        "email": credentials.email,
        "password": credentials.password,
    });
    let resp = client.send(OPERATION, &HttpRequest::post_json(login_url, &payload))?;
    let token = token_from_response(&resp)?;
    tracing::info!(email = %credentials.email, "signed in");
    Ok(token)
}

/// Validates the sign-in response: status 200/201, `success: true`, and a
/// `result.token` string, returned unchanged.
pub fn token_from_response(resp: &HttpResponse) -> Result<String, ApiError> {
    if resp.status != 200 && resp.status != 201 {
        return Err(ApiError::Status {
            operation: OPERATION.to_string(),
            status: resp.status,
            body: resp.body_snippet(),
        });
    }
    let envelope: SignInEnvelope = resp.json(OPERATION)?;
    if !envelope.success {
        return Err(ApiError::Rejected {
            operation: OPERATION.to_string(),
            message: format!("sign in failed: {}", resp.body_snippet()),
        });
    }
    envelope
        .result
        .and_then(|r| r.token)
        .ok_or_else(|| ApiError::Rejected {
            operation: OPERATION.to_string(),
            message: "response has no result.token".to_string(),
        })
}
