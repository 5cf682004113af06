//! Sale-events-by-id endpoint.

use serde_json::Value;

use crate::{PropertyClient, error::ProviderError};

impl PropertyClient {
    /// Sale history for one parcel; the payload's `sale` block carries the
    /// most recent transfer.
    ///
    /// An unknown id or a parcel with no recorded sales yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the HTTP request fails, the provider
    /// returns a failure status, or the envelope cannot be parsed.
    pub async fn sale_history(&self, id: &str) -> Result<Option<Value>, ProviderError> {
        let url = sale_history_url(&self.provider.base_url, id);
        self.first_property_at(&url).await
    }
}

fn sale_history_url(base_url: &str, id: &str) -> String {
    format!(
        "{base_url}/saleshistory/detail?attomid={}",
        urlencoding::encode(id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sale_history_url_targets_saleshistory() {
        assert_eq!(
            sale_history_url("https://api.example.com/propertyapi/v1.0.0", "184713191"),
            "https://api.example.com/propertyapi/v1.0.0/saleshistory/detail?attomid=184713191",
        );
    }

    #[test]
    fn sale_history_url_encodes_the_id() {
        assert_eq!(
            sale_history_url("https://api.example.com", "a b&c"),
            "https://api.example.com/saleshistory/detail?attomid=a%20b%26c",
        );
    }
}
