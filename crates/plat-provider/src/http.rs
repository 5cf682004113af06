//! Shared HTTP response helpers for the provider clients.
//!
//! Centralizes the status-code handling every endpoint module needs:
//! the provider's "no results" signal (a 400 whose body carries a
//! `SuccessWithoutResult` status), 429 rate limiting with `Retry-After`
//! parsing, and non-success → [`ProviderError::Api`]. Endpoint modules stay
//! focused on request construction and envelope mapping.

use crate::error::ProviderError;

/// Outcome of the shared response check.
#[derive(Debug)]
pub enum Checked {
    /// Response is usable; deserialize the envelope from it.
    Success(reqwest::Response),
    /// The provider signaled "zero results". Not an error: callers return
    /// an empty result set.
    NoResult,
}

/// Check an HTTP response for the provider's error and no-result conventions.
///
/// - **429 Too Many Requests** → [`ProviderError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **400 with a `SuccessWithoutResult` body** → [`Checked::NoResult`].
///   The provider reports empty searches this way rather than with an empty
///   array.
/// - **Other non-success status** → [`ProviderError::Api`] with status code
///   and response body.
pub async fn check_response(resp: reqwest::Response) -> Result<Checked, ProviderError> {
    let status = resp.status();
    if status == 429 {
        let retry_after_secs = parse_retry_after(&resp);
        tracing::warn!(retry_after_secs, "provider rate limited");
        return Err(ProviderError::RateLimited { retry_after_secs });
    }
    if status.is_success() {
        return Ok(Checked::Success(resp));
    }

    let body = resp.text().await.unwrap_or_default();
    if status == 400 && body.contains("SuccessWithoutResult") {
        tracing::debug!("provider signaled zero results");
        return Ok(Checked::NoResult);
    }
    tracing::warn!(status = status.as_u16(), "provider request failed");
    Err(ProviderError::Api {
        status: status.as_u16(),
        message: body,
    })
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
