//! The filter engine: range/categorical predicates over canonical records.
//!
//! Pure and stateless — safe to re-run on every render. Bounds default to
//! the min/max observed across the current candidate pool; a filter is
//! "active" only when it differs structurally from those pool-derived
//! defaults, and a record missing a field fails only *narrowed* range
//! filters, never the defaults.

use serde::{Deserialize, Serialize};

use plat_core::CanonicalProperty;

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const EMPTY: Self = Self { min: 0.0, max: 0.0 };

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Observed min/max across an iterator of values, or [`Self::EMPTY`]
    /// when nothing in the pool carries the field.
    fn observed(values: impl Iterator<Item = f64>) -> Self {
        let mut range: Option<Self> = None;
        for v in values {
            let r = range.get_or_insert(Self { min: v, max: v });
            r.min = r.min.min(v);
            r.max = r.max.max(v);
        }
        range.unwrap_or(Self::EMPTY)
    }
}

/// The active predicate set over the candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    /// `None` selects every classification.
    pub property_type: Option<String>,
    pub year_built: Range,
    pub tax_amount: Range,
    pub market_value: Range,
}

impl FilterSet {
    /// Pool-derived defaults: full observed range per field, no type filter.
    #[must_use]
    pub fn defaults_for(pool: &[CanonicalProperty]) -> Self {
        Self {
            property_type: None,
            year_built: Range::observed(
                pool.iter()
                    .filter_map(|r| r.building.year_built.map(f64::from)),
            ),
            tax_amount: Range::observed(pool.iter().filter_map(|r| r.valuation.tax_amount)),
            market_value: Range::observed(pool.iter().filter_map(|r| r.valuation.market_value)),
        }
    }

    /// Whether any predicate differs from the pool-derived defaults.
    #[must_use]
    pub fn is_active(&self, defaults: &Self) -> bool {
        self != defaults
    }
}

/// A record field either satisfies its range or, when absent, passes only
/// if the range was never narrowed from the default.
fn field_passes(value: Option<f64>, range: Range, default: Range) -> bool {
    value.map_or(range == default, |v| range.contains(v))
}

/// Evaluate the filter set over the pool. Never mutates its input.
#[must_use]
pub fn apply(
    records: &[CanonicalProperty],
    filters: &FilterSet,
    defaults: &FilterSet,
) -> Vec<CanonicalProperty> {
    records
        .iter()
        .filter(|r| {
            let type_ok = filters
                .property_type
                .as_ref()
                .is_none_or(|t| r.classification.property_type.as_deref() == Some(t.as_str()));
            type_ok
                && field_passes(
                    r.building.year_built.map(f64::from),
                    filters.year_built,
                    defaults.year_built,
                )
                && field_passes(r.valuation.tax_amount, filters.tax_amount, defaults.tax_amount)
                && field_passes(
                    r.valuation.market_value,
                    filters.market_value,
                    defaults.market_value,
                )
        })
        .cloned()
        .collect()
}
