//! Partial records produced from a single provider payload.

use serde::{Deserialize, Serialize};

use crate::enums::PayloadSource;
use crate::identity::PropertyIdentity;
use crate::property::{Address, Building, Classification, Location, Lot, Owner, Sale, Valuation};

/// One payload's worth of normalized fields, prior to merging.
///
/// Only fields the payload actually contained are set — absence here never
/// means "zero", and the merge engine (not the normalizer) decides what
/// persists. The group types are shared with [`crate::CanonicalProperty`];
/// every leaf is independently optional in both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFragment {
    /// Endpoint that produced the payload; fixes the trust rank of every
    /// leaf this fragment carries.
    pub source: PayloadSource,
    /// Provider-assigned id, when the payload carried one.
    pub provider_id: Option<String>,
    pub address: Address,
    pub location: Option<Location>,
    pub classification: Classification,
    pub building: Building,
    pub lot: Lot,
    pub valuation: Valuation,
    pub sale: Sale,
    pub owner: Option<Owner>,
}

impl PropertyFragment {
    /// Empty fragment for a source tag.
    #[must_use]
    pub fn empty(source: PayloadSource) -> Self {
        Self {
            source,
            provider_id: None,
            address: Address::default(),
            location: None,
            classification: Classification::default(),
            building: Building::default(),
            lot: Lot::default(),
            valuation: Valuation::default(),
            sale: Sale::default(),
            owner: None,
        }
    }

    /// Stable identity for this fragment: provider id if present, else a
    /// deterministic hash of the one-line address. `None` when the fragment
    /// carries neither — such fragments cannot anchor a record.
    #[must_use]
    pub fn identity(&self) -> Option<PropertyIdentity> {
        if let Some(id) = &self.provider_id {
            return Some(PropertyIdentity::from_provider_id(id));
        }
        let one_line = self.address.one_line();
        if one_line.is_empty() {
            None
        } else {
            Some(PropertyIdentity::from_address(&one_line))
        }
    }
}
