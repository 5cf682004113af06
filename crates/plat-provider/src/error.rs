//! Provider and geocoder error types.
//!
//! Zero results are never represented here: every operation returns
//! `Ok(empty)` / `Ok(None)` for `not_found`, so callers branch on data, not
//! on errors. These enums cover transport failures and upstream-signaled
//! failures only.

use thiserror::Error;

/// Errors from the property-data provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport error (network taxonomy).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider responded with a non-success status (upstream taxonomy).
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Provider returned a 429 Too Many Requests response.
    #[error("rate limited - retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a provider response envelope.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Errors from the reverse geocoder.
///
/// "No address at this point" is NOT an error — the resolver returns
/// `Ok(None)` for water and closed roads. Only transport and upstream
/// failures land here.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Geocoder responded with a non-success status.
    #[error("geocoder error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the geocoder.
        status: u16,
        /// Error message or response body.
        message: String,
    },
}
