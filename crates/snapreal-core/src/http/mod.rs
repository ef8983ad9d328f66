//! Blocking HTTP client over libcurl with transport-level retries.
//!
//! One `Easy` handle per attempt. Any 2xx/4xx/5xx response is returned as an
//! `HttpResponse` for the caller to inspect; only curl errors are retried.

mod error;

pub use error::ApiError;

use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::SnaprealConfig;
use crate::retry::{run_with_retry, RetryPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A single request: method, URL, header lines and optional body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: &serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body.to_string().into_bytes()),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {}", token))
    }
}

/// Status code and raw body of a completed exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn json<T: DeserializeOwned>(&self, operation: &str) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|source| ApiError::Decode {
            operation: operation.to_string(),
            source,
        })
    }

    /// Body as lossy UTF-8, truncated for error messages and logs.
    pub fn body_snippet(&self) -> String {
        const MAX: usize = 512;
        let text = String::from_utf8_lossy(&self.body);
        match text.char_indices().nth(MAX) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.into_owned(),
        }
    }
}

/// Timeouts applied to every `Easy` handle.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    curl: CurlOptions,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn new(curl: CurlOptions, retry: RetryPolicy) -> Self {
        Self { curl, retry }
    }

    pub fn from_config(cfg: &SnaprealConfig) -> Self {
        Self::new(
            CurlOptions {
                connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
                timeout: Duration::from_secs(cfg.request_timeout_secs),
            },
            cfg.retry_policy(),
        )
    }

    /// Sends `req`, retrying transport failures per the client's policy.
    /// `operation` names the call in logs and errors (e.g. `sign_in`).
    /// A request curl refuses to build fails once with `ApiError::Request`.
    pub fn send(&self, operation: &str, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(operation, method = ?req.method, url = %req.url, "http request");
        let mut easy = build(req, self.curl).map_err(|source| ApiError::Request {
            operation: operation.to_string(),
            source,
        })?;
        let resp = run_with_retry(&self.retry, operation, || perform(&mut easy))?;
        tracing::debug!(operation, status = resp.status, bytes = resp.body.len(), "http response");
        Ok(resp)
    }
}

/// Configure an `Easy` handle for `req`; reused for every attempt.
fn build(req: &HttpRequest, opts: CurlOptions) -> Result<curl::easy::Easy, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(&req.url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;

    match req.method {
        Method::Get => easy.get(true)?,
        Method::Post => {
            easy.post(true)?;
            easy.post_fields_copy(req.body.as_deref().unwrap_or(&[]))?;
        }
    }

    let mut list = curl::easy::List::new();
    for (k, v) in &req.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !req.headers.is_empty() {
        easy.http_headers(list)?;
    }
    Ok(easy)
}

/// One attempt. Runs in the current thread.
fn perform(easy: &mut curl::easy::Easy) -> Result<HttpResponse, curl::Error> {
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    Ok(HttpResponse { status, body })
}
