//! Postal-code and street-address search endpoints.

use serde_json::Value;

use crate::{PropertyClient, error::ProviderError};

impl PropertyClient {
    /// All properties in a postal code, up to the configured page size.
    ///
    /// An unknown or empty postal code yields `Ok(empty)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the HTTP request fails, the provider
    /// returns a failure status, or the envelope cannot be parsed.
    pub async fn search_by_postal(&self, code: &str) -> Result<Vec<Value>, ProviderError> {
        let url = format!(
            "{}/property/address?postalcode={}&pagesize={}",
            self.provider.base_url,
            urlencoding::encode(code),
            self.provider.page_size,
        );
        self.properties_at(&url).await
    }

    /// Properties matching a two-line street address.
    ///
    /// `line1` is the street line, `line2` the locality line
    /// ("City, ST Postal"). Unmatched addresses yield `Ok(empty)`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the HTTP request fails, the provider
    /// returns a failure status, or the envelope cannot be parsed.
    pub async fn search_by_address(
        &self,
        line1: &str,
        line2: &str,
    ) -> Result<Vec<Value>, ProviderError> {
        let url = format!(
            "{}/property/address?address1={}&address2={}&pagesize={}",
            self.provider.base_url,
            urlencoding::encode(line1),
            urlencoding::encode(line2),
            self.provider.page_size,
        );
        self.properties_at(&url).await
    }
}

#[cfg(test)]
mod tests {
    use plat_config::PlatConfig;

    use super::*;

    #[tokio::test]
    #[ignore] // requires network and PLAT_PROVIDER__API_KEY
    async fn live_postal_search() {
        let config = PlatConfig::load_with_dotenv().expect("config");
        let client = PropertyClient::new(&config);
        let payloads = client.search_by_postal("10019").await.expect("search");
        println!("postal 10019 -> {} payloads", payloads.len());
        assert!(!payloads.is_empty());
    }

    #[tokio::test]
    #[ignore] // requires network and PLAT_PROVIDER__API_KEY
    async fn live_address_search() {
        let config = PlatConfig::load_with_dotenv().expect("config");
        let client = PropertyClient::new(&config);
        let payloads = client
            .search_by_address("157 W 57th St", "New York, NY 10019")
            .await
            .expect("search");
        println!("address search -> {} payloads", payloads.len());
    }
}
