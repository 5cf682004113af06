//! # plat-provider
//!
//! HTTP clients for the property-data provider and the reverse geocoder.
//!
//! Wraps the provider's heterogeneous endpoints behind one client:
//! - postal-code search (`/property/address?postalcode=`)
//! - street-address search (`/property/address?address1=&address2=`)
//! - detail by id (`/property/expandedprofile`)
//! - owner by id (`/property/detailowner`)
//! - sale events by id (`/saleshistory/detail`)
//! - reverse geocoding (Nominatim-style `/reverse`)
//!
//! Payloads are returned raw (`serde_json::Value`); normalization into
//! canonical fragments is `plat-core`'s job. Zero results are data
//! (`Ok(empty)` / `Ok(None)`), never errors.

mod detail;
mod envelope;
mod error;
mod events;
mod geocode;
mod http;
mod owner;
mod search;

pub use error::{GeocodeError, ProviderError};

use plat_config::{GeocoderConfig, PlatConfig, ProviderConfig};
use serde_json::Value;

use crate::envelope::Envelope;
use crate::http::{Checked, check_response};

/// HTTP client for the five provider operations plus reverse geocoding.
pub struct PropertyClient {
    http: reqwest::Client,
    provider: ProviderConfig,
    geocoder: GeocoderConfig,
}

impl PropertyClient {
    /// Create a client from loaded configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(config: &PlatConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(config.geocoder.user_agent.clone())
                .timeout(std::time::Duration::from_secs(config.provider.timeout_secs))
                .build()
                .expect("reqwest client should build"),
            provider: config.provider.clone(),
            geocoder: config.geocoder.clone(),
        }
    }

    /// GET a provider URL and unwrap the property envelope.
    ///
    /// Both the HTTP-level no-result signal (400 + `SuccessWithoutResult`)
    /// and the in-envelope one collapse to an empty list here.
    pub(crate) async fn properties_at(&self, url: &str) -> Result<Vec<Value>, ProviderError> {
        let resp = self
            .http
            .get(url)
            .header("apikey", &self.provider.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let resp = match check_response(resp).await? {
            Checked::Success(resp) => resp,
            Checked::NoResult => return Ok(Vec::new()),
        };

        let envelope: Envelope = resp
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;
        if envelope.is_no_result() {
            return Ok(Vec::new());
        }
        Ok(envelope.property)
    }

    /// Like [`Self::properties_at`], keeping only the first payload.
    /// Used by the by-id endpoints, which address exactly one parcel.
    pub(crate) async fn first_property_at(
        &self,
        url: &str,
    ) -> Result<Option<Value>, ProviderError> {
        Ok(self.properties_at(url).await?.into_iter().next())
    }
}
