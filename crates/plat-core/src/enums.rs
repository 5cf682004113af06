//! Completeness, payload-source, and query enums for Plat.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `PayloadSource` carries the fixed trust ranking used by the merge engine
//! to resolve conflicting leaf values.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Completeness
// ---------------------------------------------------------------------------

/// How much of a canonical record has been populated.
///
/// Recomputed after every merge, never stored stale. A record is `Detailed`
/// once both the building size and the lot size are known — those two fields
/// come only from the detail endpoint, so their presence means enrichment
/// has landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completeness {
    Summary,
    Detailed,
}

impl Completeness {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Detailed => "detailed",
        }
    }
}

impl fmt::Display for Completeness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PayloadSource
// ---------------------------------------------------------------------------

/// Which provider endpoint produced a payload.
///
/// Trust order for overlapping leaves, highest first:
/// detail > search > click. Owner and events payloads only contribute fields
/// the other endpoints never carry, so their rank only matters for the
/// union-in path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadSource {
    Search,
    Detail,
    Owner,
    Events,
    Click,
}

impl PayloadSource {
    /// Numeric trust rank; higher wins a leaf conflict.
    #[must_use]
    pub const fn trust_rank(self) -> u8 {
        match self {
            Self::Detail => 3,
            Self::Search | Self::Owner | Self::Events => 2,
            Self::Click => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Detail => "detail",
            Self::Owner => "owner",
            Self::Events => "events",
            Self::Click => "click",
        }
    }
}

impl fmt::Display for PayloadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SearchQuery
// ---------------------------------------------------------------------------

/// A user-issued search, immutable once issued.
///
/// Postal and address searches belong to the list family and supersede each
/// other; click searches run their own staleness sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchQuery {
    Postal { code: String },
    Address { line1: String, line2: String },
    Click { lat: f64, lng: f64 },
}

impl SearchQuery {
    /// Whether this query belongs to the click family (own staleness token).
    #[must_use]
    pub const fn is_click(&self) -> bool {
        matches!(self, Self::Click { .. })
    }

    /// Human-readable description for the search-history sink.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Postal { code } => format!("postal:{code}"),
            Self::Address { line1, line2 } => format!("address:{line1}, {line2}"),
            Self::Click { lat, lng } => format!("click:{lat:.5},{lng:.5}"),
        }
    }
}
