//! Output type of the reverse-geocode resolver.

use serde::{Deserialize, Serialize};

/// A mailing address resolved from a map click.
///
/// `None` at the resolver level (water, closed roads) is a normal outcome,
/// not an error; this type only exists for the populated case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    /// House number + road.
    pub line1: String,
    /// City/town/village, state, and postal code.
    pub line2: String,
    /// Provider display name, for history events and UI labels.
    pub display_name: String,
}
