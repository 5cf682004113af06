//! Marker and viewport synchronization against the map collaborator.
//!
//! The registry is the sole owner of marker handles: markers are created
//! when a record enters the active result list, restyled on selection
//! change, and destroyed when a new search replaces the list. The click
//! marker is a singleton independent of the result-marker set — a second
//! click replaces it rather than accumulating markers. The camera moves
//! only on list replacement (fit to bounds) and on an explicit user map
//! click (fly to point), never on enrichment completion.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use plat_core::property::Location;
use plat_core::{CanonicalProperty, PropertyIdentity};

// ---------------------------------------------------------------------------
// MarkerVisual
// ---------------------------------------------------------------------------

/// Icon state of a marker.
///
/// ```text
/// default → selected → default
///           selected → pending → selected
/// ```
///
/// `Error` appears only on the click marker, when geocoding or the follow-up
/// lookup fails; it ends when the next click replaces the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerVisual {
    Default,
    Selected,
    Pending,
    Error,
}

impl MarkerVisual {
    /// Valid next states for a result-list marker.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Default => &[Self::Selected],
            Self::Selected => &[Self::Default, Self::Pending],
            Self::Pending => &[Self::Selected, Self::Default],
            Self::Error => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Selected => "selected",
            Self::Pending => "pending",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for MarkerVisual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action a marker popup can route back through the synchronizer. The popup
/// layer only renders; behavior lives on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerAction {
    View,
    Save,
}

// ---------------------------------------------------------------------------
// MapSurface
// ---------------------------------------------------------------------------

/// Opaque handle to a placed marker, issued by the map collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerHandle(pub u64);

/// The map-library collaborator. Consumed, not reimplemented: the engine
/// calls these and owns which markers exist, never how they render.
pub trait MapSurface {
    fn place_marker(
        &mut self,
        id: &PropertyIdentity,
        position: Location,
        state: MarkerVisual,
    ) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);
    fn set_marker_icon(&mut self, handle: MarkerHandle, state: MarkerVisual);
    fn fit_bounds(&mut self, positions: &[Location], padding_px: u32);
    fn fly_to(&mut self, position: Location, zoom: f64);
}

// ---------------------------------------------------------------------------
// MarkerRegistry
// ---------------------------------------------------------------------------

/// One live marker owned by the registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerEntry {
    pub handle: MarkerHandle,
    pub position: Location,
    pub visual: MarkerVisual,
}

/// Owned registry of result-list markers plus the singleton click marker.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    entries: BTreeMap<PropertyIdentity, MarkerEntry>,
    selected: Option<PropertyIdentity>,
    click: Option<MarkerEntry>,
}

impl MarkerRegistry {
    /// Replace the whole result-marker set with one marker per record that
    /// has coordinates, then fit the camera to their bounds. The click
    /// marker is independent and survives list replacement.
    pub fn replace_all(
        &mut self,
        map: &mut impl MapSurface,
        records: &[CanonicalProperty],
        padding_px: u32,
    ) {
        for entry in self.entries.values() {
            map.remove_marker(entry.handle);
        }
        self.entries.clear();
        self.selected = None;

        for record in records {
            let Some(position) = record.location else {
                continue;
            };
            let handle = map.place_marker(&record.identity, position, MarkerVisual::Default);
            self.entries.insert(
                record.identity.clone(),
                MarkerEntry {
                    handle,
                    position,
                    visual: MarkerVisual::Default,
                },
            );
        }

        let positions: Vec<Location> = self.entries.values().map(|e| e.position).collect();
        if !positions.is_empty() {
            map.fit_bounds(&positions, padding_px);
        }
    }

    /// Move the selection highlight: the previously selected marker reverts
    /// to `Default`, the new one becomes `Selected`. At most one marker is
    /// ever selected. No-op on the marker set when the identity has no
    /// marker (record without coordinates).
    pub fn select(&mut self, map: &mut impl MapSurface, identity: &PropertyIdentity) {
        if self.selected.as_ref() == Some(identity) {
            return;
        }
        if let Some(prev) = self.selected.take() {
            self.set_visual(map, &prev, MarkerVisual::Default);
        }
        if self.entries.contains_key(identity) {
            self.set_visual(map, identity, MarkerVisual::Selected);
            self.selected = Some(identity.clone());
        }
    }

    /// Restyle one marker, enforcing the transition machine.
    pub fn set_visual(
        &mut self,
        map: &mut impl MapSurface,
        identity: &PropertyIdentity,
        next: MarkerVisual,
    ) {
        let Some(entry) = self.entries.get_mut(identity) else {
            return;
        };
        if entry.visual == next || !entry.visual.can_transition_to(next) {
            return;
        }
        entry.visual = next;
        map.set_marker_icon(entry.handle, next);
    }

    /// Place (or replace) the singleton click marker.
    pub fn place_click(
        &mut self,
        map: &mut impl MapSurface,
        position: Location,
        visual: MarkerVisual,
    ) {
        static CLICK_ID: &str = "click";
        if let Some(prev) = self.click.take() {
            map.remove_marker(prev.handle);
        }
        let handle = map.place_marker(
            &PropertyIdentity::from_provider_id(CLICK_ID),
            position,
            visual,
        );
        self.click = Some(MarkerEntry {
            handle,
            position,
            visual,
        });
    }

    /// Restyle the click marker in place (e.g. provisional → error).
    pub fn set_click_visual(&mut self, map: &mut impl MapSurface, visual: MarkerVisual) {
        if let Some(entry) = &mut self.click {
            if entry.visual != visual {
                entry.visual = visual;
                map.set_marker_icon(entry.handle, visual);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, identity: &PropertyIdentity) -> Option<&MarkerEntry> {
        self.entries.get(identity)
    }

    /// Identities with a live marker, in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &PropertyIdentity> {
        self.entries.keys()
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&PropertyIdentity> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn click_marker(&self) -> Option<&MarkerEntry> {
        self.click.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeMap;
    use plat_core::CanonicalProperty;
    use pretty_assertions::assert_eq;

    fn record(id: &str, lat: f64) -> CanonicalProperty {
        let mut r = CanonicalProperty::new(PropertyIdentity::from_provider_id(id));
        r.location = Some(Location {
            latitude: lat,
            longitude: -73.98,
        });
        r
    }

    #[test]
    fn replace_all_destroys_then_creates_and_fits() {
        let mut map = FakeMap::default();
        let mut reg = MarkerRegistry::default();

        reg.replace_all(&mut map, &[record("1", 40.1), record("2", 40.2)], 48);
        assert_eq!(reg.len(), 2);
        assert_eq!(map.live.len(), 2);
        assert_eq!(map.fit_calls, vec![(2, 48)]);

        reg.replace_all(&mut map, &[record("3", 40.3)], 48);
        assert_eq!(reg.len(), 1);
        // Old handles were removed, exactly one marker is live.
        assert_eq!(map.live.len(), 1);
    }

    #[test]
    fn at_most_one_marker_selected() {
        let mut map = FakeMap::default();
        let mut reg = MarkerRegistry::default();
        reg.replace_all(&mut map, &[record("1", 40.1), record("2", 40.2)], 48);

        let a = PropertyIdentity::from_provider_id("1");
        let b = PropertyIdentity::from_provider_id("2");

        reg.select(&mut map, &a);
        assert_eq!(reg.get(&a).unwrap().visual, MarkerVisual::Selected);

        reg.select(&mut map, &b);
        assert_eq!(reg.get(&a).unwrap().visual, MarkerVisual::Default);
        assert_eq!(reg.get(&b).unwrap().visual, MarkerVisual::Selected);
        assert_eq!(reg.selected_id(), Some(&b));
    }

    #[test]
    fn reselecting_same_identity_is_a_no_op() {
        let mut map = FakeMap::default();
        let mut reg = MarkerRegistry::default();
        reg.replace_all(&mut map, &[record("1", 40.1)], 48);

        let a = PropertyIdentity::from_provider_id("1");
        reg.select(&mut map, &a);
        let icon_calls = map.icon_calls.len();
        reg.select(&mut map, &a);
        assert_eq!(map.icon_calls.len(), icon_calls);
    }

    #[test]
    fn pending_round_trips_back_to_selected() {
        let mut map = FakeMap::default();
        let mut reg = MarkerRegistry::default();
        reg.replace_all(&mut map, &[record("1", 40.1)], 48);
        let a = PropertyIdentity::from_provider_id("1");

        reg.select(&mut map, &a);
        reg.set_visual(&mut map, &a, MarkerVisual::Pending);
        assert_eq!(reg.get(&a).unwrap().visual, MarkerVisual::Pending);
        reg.set_visual(&mut map, &a, MarkerVisual::Selected);
        assert_eq!(reg.get(&a).unwrap().visual, MarkerVisual::Selected);
    }

    #[test]
    fn default_cannot_jump_to_pending() {
        let mut map = FakeMap::default();
        let mut reg = MarkerRegistry::default();
        reg.replace_all(&mut map, &[record("1", 40.1)], 48);
        let a = PropertyIdentity::from_provider_id("1");

        reg.set_visual(&mut map, &a, MarkerVisual::Pending);
        assert_eq!(reg.get(&a).unwrap().visual, MarkerVisual::Default);
    }

    #[test]
    fn second_click_replaces_the_first_marker() {
        let mut map = FakeMap::default();
        let mut reg = MarkerRegistry::default();
        let p1 = Location { latitude: 40.1, longitude: -73.9 };
        let p2 = Location { latitude: 40.2, longitude: -73.8 };

        reg.place_click(&mut map, p1, MarkerVisual::Pending);
        reg.place_click(&mut map, p2, MarkerVisual::Pending);
        assert_eq!(map.live.len(), 1);
        assert_eq!(reg.click_marker().unwrap().position, p2);
    }

    #[test]
    fn click_marker_survives_list_replacement() {
        let mut map = FakeMap::default();
        let mut reg = MarkerRegistry::default();
        let p = Location { latitude: 40.1, longitude: -73.9 };

        reg.place_click(&mut map, p, MarkerVisual::Error);
        reg.replace_all(&mut map, &[record("1", 40.2)], 48);
        assert!(reg.click_marker().is_some());
        assert_eq!(map.live.len(), 2);
    }

    #[test]
    fn records_without_coordinates_get_no_marker() {
        let mut map = FakeMap::default();
        let mut reg = MarkerRegistry::default();
        let mut no_coords = CanonicalProperty::new(PropertyIdentity::from_provider_id("9"));
        no_coords.location = None;

        reg.replace_all(&mut map, &[record("1", 40.1), no_coords], 48);
        assert_eq!(reg.len(), 1);
        assert_eq!(map.fit_calls, vec![(1, 48)]);
    }
}
