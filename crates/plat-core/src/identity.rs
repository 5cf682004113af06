//! Stable property identity.
//!
//! Identity is immutable once assigned and must be reproducible across
//! renders and repeated normalization of the same payload: fragments for the
//! same parcel merge into one record keyed by this value. Randomness is
//! therefore never involved — identity comes from the provider id when one
//! exists, else from a hash of the normalized address.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Stable key for one parcel across all provider endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyIdentity(String);

impl PropertyIdentity {
    /// Identity from a provider-assigned id.
    #[must_use]
    pub fn from_provider_id(id: &str) -> Self {
        Self(format!("provider:{}", id.trim()))
    }

    /// Identity derived from a one-line address when no provider id exists.
    ///
    /// The address is lowercased and whitespace-collapsed before hashing so
    /// cosmetic differences between payloads do not split a parcel in two.
    #[must_use]
    pub fn from_address(one_line: &str) -> Self {
        let normalized = one_line
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let digest = Sha256::digest(normalized.as_bytes());
        let hex: String = digest.iter().take(8).map(|b| format!("{b:02x}")).collect();
        Self(format!("addr:{hex}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn provider_id_is_prefixed_and_trimmed() {
        let id = PropertyIdentity::from_provider_id(" 184713191 ");
        assert_eq!(id.as_str(), "provider:184713191");
    }

    #[test]
    fn address_hash_is_deterministic() {
        let a = PropertyIdentity::from_address("157 W 57th St, New York, NY, 10019");
        let b = PropertyIdentity::from_address("157 W 57th St, New York, NY, 10019");
        assert_eq!(a, b);
    }

    #[test]
    fn address_hash_ignores_case_and_spacing() {
        let a = PropertyIdentity::from_address("157 W 57TH ST,  New York, NY, 10019");
        let b = PropertyIdentity::from_address("157 w 57th st, new york, ny, 10019");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_addresses_do_not_collide() {
        let a = PropertyIdentity::from_address("157 W 57th St, New York, NY, 10019");
        let b = PropertyIdentity::from_address("161 W 57th St, New York, NY, 10019");
        assert_ne!(a, b);
    }
}
