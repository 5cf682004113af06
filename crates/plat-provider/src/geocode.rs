//! Reverse geocoding: map point → mailing address.
//!
//! Talks to a Nominatim-style `/reverse` endpoint. "No street-level address
//! here" (water, closed roads, bare land) is a normal outcome and comes back
//! as `Ok(None)`; only transport and upstream failures are errors. No
//! retries — a transient failure propagates typed and the user can click
//! again.

use serde::Deserialize;

use plat_core::GeocodedAddress;

use crate::{PropertyClient, error::GeocodeError};

#[derive(Debug, Default, Deserialize)]
struct ReverseResponse {
    /// Set when the point resolves to nothing ("Unable to geocode").
    error: Option<String>,
    display_name: Option<String>,
    #[serde(default)]
    address: ReverseAddress,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseAddress {
    house_number: Option<String>,
    road: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
}

impl PropertyClient {
    /// Resolve a map click to a structured mailing address.
    ///
    /// Returns `Ok(None)` when the point has no street-level address.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the HTTP request fails or the geocoder
    /// returns a failure status.
    pub async fn reverse_geocode(
        &self,
        lat: f64,
        lng: f64,
    ) -> Result<Option<GeocodedAddress>, GeocodeError> {
        let url = format!(
            "{}/reverse?format=jsonv2&lat={lat}&lon={lng}",
            self.geocoder.base_url,
        );
        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.geocoder.user_agent)
            .timeout(std::time::Duration::from_secs(self.geocoder.timeout_secs))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(GeocodeError::Api {
                status: resp.status().as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let data: ReverseResponse = resp.json().await?;
        Ok(to_geocoded(data))
    }
}

/// Map the raw reverse response into a [`GeocodedAddress`].
///
/// A response without a road is treated the same as the geocoder's explicit
/// error field: there is no street-level address at this point.
fn to_geocoded(data: ReverseResponse) -> Option<GeocodedAddress> {
    if data.error.is_some() {
        return None;
    }
    let road = data.address.road?;

    let line1 = match &data.address.house_number {
        Some(num) => format!("{num} {road}"),
        None => road,
    };
    let locality = data
        .address
        .city
        .or(data.address.town)
        .or(data.address.village);
    let line2 = [locality, data.address.state, data.address.postcode]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    let display_name = data
        .display_name
        .unwrap_or_else(|| format!("{line1}, {line2}"));

    Some(GeocodedAddress {
        line1,
        line2,
        display_name,
    })
}
