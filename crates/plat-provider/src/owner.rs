//! Owner-by-id endpoint.

use serde_json::Value;

use crate::{PropertyClient, error::ProviderError};

impl PropertyClient {
    /// Owner names, corporate flag, and mailing address for one parcel.
    ///
    /// An unknown id yields `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the HTTP request fails, the provider
    /// returns a failure status, or the envelope cannot be parsed.
    pub async fn owner(&self, id: &str) -> Result<Option<Value>, ProviderError> {
        let url = owner_url(&self.provider.base_url, id);
        self.first_property_at(&url).await
    }
}

fn owner_url(base_url: &str, id: &str) -> String {
    format!(
        "{base_url}/property/detailowner?attomid={}",
        urlencoding::encode(id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn owner_url_targets_detailowner() {
        assert_eq!(
            owner_url("https://api.example.com/propertyapi/v1.0.0", "184713191"),
            "https://api.example.com/propertyapi/v1.0.0/property/detailowner?attomid=184713191",
        );
    }

    #[test]
    fn owner_url_encodes_the_id() {
        assert_eq!(
            owner_url("https://api.example.com", "a b&c"),
            "https://api.example.com/property/detailowner?attomid=a%20b%26c",
        );
    }
}
