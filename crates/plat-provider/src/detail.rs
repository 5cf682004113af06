//! Detail-by-id endpoint (expanded profile).

use serde_json::Value;

use crate::{PropertyClient, error::ProviderError};

impl PropertyClient {
    /// Expanded profile for one parcel: building/lot sizes, assessment,
    /// and the fields lightweight search results omit.
    ///
    /// An unknown id yields `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the HTTP request fails, the provider
    /// returns a failure status, or the envelope cannot be parsed.
    pub async fn detail(&self, id: &str) -> Result<Option<Value>, ProviderError> {
        let url = format!(
            "{}/property/expandedprofile?attomid={}",
            self.provider.base_url,
            urlencoding::encode(id),
        );
        self.first_property_at(&url).await
    }
}

#[cfg(test)]
mod tests {
    use plat_config::PlatConfig;

    use super::*;

    #[tokio::test]
    #[ignore] // requires network and PLAT_PROVIDER__API_KEY
    async fn live_detail_unknown_id_is_none() {
        let config = PlatConfig::load_with_dotenv().expect("config");
        let client = PropertyClient::new(&config);
        let payload = client.detail("0").await.expect("detail");
        assert!(payload.is_none());
    }
}
