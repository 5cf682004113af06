//! The canonical property record and its field groups.
//!
//! One `CanonicalProperty` is the unit of truth for a parcel. Every leaf in
//! the optional groups is independently optional; which leaves are populated
//! depends on which endpoints have contributed fragments so far. The record
//! also carries per-leaf provenance so the merge engine can enforce the
//! trust order without re-deriving where a value came from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::enums::{Completeness, PayloadSource};
use crate::identity::PropertyIdentity;

/// Structured mailing address plus the provider-supplied one-line form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub line1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal: Option<String>,
    /// Provider-supplied single-line address, preferred verbatim when present.
    pub one_line: Option<String>,
}

impl Address {
    /// Single-line form: the provider's verbatim value when present, else
    /// the non-empty components comma-joined.
    #[must_use]
    pub fn one_line(&self) -> String {
        if let Some(ol) = &self.one_line {
            if !ol.trim().is_empty() {
                return ol.clone();
            }
        }
        [&self.line1, &self.city, &self.state, &self.postal]
            .into_iter()
            .filter_map(|c| c.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub property_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub size_sq_ft: Option<f64>,
    pub year_built: Option<u32>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f64>,
    pub stories: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub size_sq_ft: Option<f64>,
    pub size_acres: Option<f64>,
}

/// Valuation figures. `market_value` is resolved through the fixed fallback
/// chain in the normalizer, never an arbitrary pick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub market_value: Option<f64>,
    pub assessed_value: Option<f64>,
    pub land_value: Option<f64>,
    pub tax_amount: Option<f64>,
    pub tax_year: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub document_type: Option<String>,
}

/// Owner facts, absent until enrichment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub primary_name: Option<String>,
    pub secondary_name: Option<String>,
    pub is_corporate: Option<bool>,
    pub mailing_address: Option<String>,
}

/// Per-leaf record of which endpoint last wrote a value.
///
/// Not serialized — provenance only drives merge decisions within a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Provenance(HashMap<&'static str, PayloadSource>);

impl Provenance {
    /// Trust rank of the source that wrote `leaf`, if any source has.
    #[must_use]
    pub fn rank_of(&self, leaf: &str) -> Option<u8> {
        self.0.get(leaf).map(|s| s.trust_rank())
    }

    pub fn note(&mut self, leaf: &'static str, source: PayloadSource) {
        self.0.insert(leaf, source);
    }
}

/// One real-estate parcel, the unit of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalProperty {
    pub identity: PropertyIdentity,
    /// Provider-assigned id, kept for by-id enrichment calls. Records keyed
    /// by address hash have none and cannot be enriched.
    pub provider_id: Option<String>,
    pub address: Address,
    pub location: Option<Location>,
    pub classification: Classification,
    pub building: Building,
    pub lot: Lot,
    pub valuation: Valuation,
    pub sale: Sale,
    pub owner: Option<Owner>,
    pub completeness: Completeness,
    #[serde(skip)]
    pub provenance: Provenance,
}

impl CanonicalProperty {
    /// Empty record for an identity; everything else arrives via merge.
    #[must_use]
    pub fn new(identity: PropertyIdentity) -> Self {
        Self {
            identity,
            provider_id: None,
            address: Address::default(),
            location: None,
            classification: Classification::default(),
            building: Building::default(),
            lot: Lot::default(),
            valuation: Valuation::default(),
            sale: Sale::default(),
            owner: None,
            completeness: Completeness::Summary,
            provenance: Provenance::default(),
        }
    }

    /// Recompute `completeness` from the populated groups.
    pub fn recompute_completeness(&mut self) {
        self.completeness = if self.building.size_sq_ft.is_some() && self.lot.size_sq_ft.is_some()
        {
            Completeness::Detailed
        } else {
            Completeness::Summary
        };
    }

    /// Whether this record should be enriched with detail/owner/events data.
    ///
    /// Building and lot sizes are reliably present only from the detail
    /// endpoint; either one missing marks the record as a lightweight search
    /// result.
    #[must_use]
    pub const fn needs_detail(&self) -> bool {
        self.building.size_sq_ft.is_none() || self.lot.size_sq_ft.is_none()
    }
}
