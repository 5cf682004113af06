//! Collaborator seams: property source and search-history sink.
//!
//! The engine is generic over these traits so tests drive it with scripted
//! fakes and the application wires in the real HTTP clients. Failures cross
//! this seam as typed values — zero results are data, and history-sink
//! failures are swallowed by the engine, never propagated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use plat_core::GeocodedAddress;
use plat_provider::{GeocodeError, PropertyClient, ProviderError};

/// Classified failure from the property source or geocoder.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// Transport never completed; retryable by user action.
    #[error("network failure: {0}")]
    Network(String),

    /// The provider responded but signaled failure.
    #[error("upstream failure: {detail}")]
    Upstream { detail: String },
}

impl From<ProviderError> for SourceError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Http(inner) => Self::Network(inner.to_string()),
            other => Self::Upstream {
                detail: other.to_string(),
            },
        }
    }
}

impl From<GeocodeError> for SourceError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::Http(inner) => Self::Network(inner.to_string()),
            other => Self::Upstream {
                detail: other.to_string(),
            },
        }
    }
}

/// The five provider operations plus reverse geocoding.
///
/// Every operation returns zero-or-more raw payloads; `not_found` is an
/// empty result, never an error.
pub trait PropertySource {
    fn search_by_postal(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Vec<Value>, SourceError>>;

    fn search_by_address(
        &self,
        line1: &str,
        line2: &str,
    ) -> impl Future<Output = Result<Vec<Value>, SourceError>>;

    fn detail(&self, id: &str) -> impl Future<Output = Result<Option<Value>, SourceError>>;

    fn owner(&self, id: &str) -> impl Future<Output = Result<Option<Value>, SourceError>>;

    fn sale_history(&self, id: &str)
    -> impl Future<Output = Result<Option<Value>, SourceError>>;

    /// `Ok(None)` when no street-level address exists at the point.
    fn reverse_geocode(
        &self,
        lat: f64,
        lng: f64,
    ) -> impl Future<Output = Result<Option<GeocodedAddress>, SourceError>>;
}

impl PropertySource for PropertyClient {
    async fn search_by_postal(&self, code: &str) -> Result<Vec<Value>, SourceError> {
        Ok(PropertyClient::search_by_postal(self, code).await?)
    }

    async fn search_by_address(&self, line1: &str, line2: &str) -> Result<Vec<Value>, SourceError> {
        Ok(PropertyClient::search_by_address(self, line1, line2).await?)
    }

    async fn detail(&self, id: &str) -> Result<Option<Value>, SourceError> {
        Ok(PropertyClient::detail(self, id).await?)
    }

    async fn owner(&self, id: &str) -> Result<Option<Value>, SourceError> {
        Ok(PropertyClient::owner(self, id).await?)
    }

    async fn sale_history(&self, id: &str) -> Result<Option<Value>, SourceError> {
        Ok(PropertyClient::sale_history(self, id).await?)
    }

    async fn reverse_geocode(
        &self,
        lat: f64,
        lng: f64,
    ) -> Result<Option<GeocodedAddress>, SourceError> {
        Ok(PropertyClient::reverse_geocode(self, lat, lng).await?)
    }
}

/// One "record this search" event for the external history sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEvent {
    /// Query description (e.g. `postal:10019`).
    pub description: String,
    pub result_count: usize,
    /// Truncated sample of one-line result addresses.
    pub sample: Vec<String>,
    pub at: DateTime<Utc>,
}

/// External search-history sink. Failures must never affect the search flow:
/// the engine logs and swallows them.
pub trait HistorySink {
    fn record(&self, event: SearchEvent) -> impl Future<Output = anyhow::Result<()>>;
}

/// Sink that drops every event; for applications without history.
pub struct NullSink;

impl HistorySink for NullSink {
    async fn record(&self, _event: SearchEvent) -> anyhow::Result<()> {
        Ok(())
    }
}
