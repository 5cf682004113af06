//! Shared test fakes for the map collaborator.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use plat_core::PropertyIdentity;
use plat_core::property::Location;

use crate::markers::{MapSurface, MarkerHandle, MarkerVisual};

/// Recording fake for the map collaborator: tracks live handles and every
/// camera/icon call so tests can assert marker lifecycle and viewport
/// behavior.
#[derive(Default)]
pub struct FakeMap {
    next_handle: u64,
    pub live: HashSet<MarkerHandle>,
    pub fit_calls: Vec<(usize, u32)>,
    pub fly_calls: Vec<(Location, f64)>,
    pub icon_calls: Vec<(MarkerHandle, MarkerVisual)>,
}

impl MapSurface for FakeMap {
    fn place_marker(
        &mut self,
        _id: &PropertyIdentity,
        _position: Location,
        _state: MarkerVisual,
    ) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.live.insert(handle);
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        assert!(self.live.remove(&handle), "removed a dead handle");
    }

    fn set_marker_icon(&mut self, handle: MarkerHandle, state: MarkerVisual) {
        assert!(self.live.contains(&handle), "restyled a dead handle");
        self.icon_calls.push((handle, state));
    }

    fn fit_bounds(&mut self, positions: &[Location], padding_px: u32) {
        self.fit_calls.push((positions.len(), padding_px));
    }

    fn fly_to(&mut self, position: Location, zoom: f64) {
        self.fly_calls.push((position, zoom));
    }
}

/// Shared-handle variant so a test can keep inspecting the map after the
/// engine takes ownership of its collaborator.
impl MapSurface for Rc<RefCell<FakeMap>> {
    fn place_marker(
        &mut self,
        id: &PropertyIdentity,
        position: Location,
        state: MarkerVisual,
    ) -> MarkerHandle {
        self.borrow_mut().place_marker(id, position, state)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.borrow_mut().remove_marker(handle);
    }

    fn set_marker_icon(&mut self, handle: MarkerHandle, state: MarkerVisual) {
        self.borrow_mut().set_marker_icon(handle, state);
    }

    fn fit_bounds(&mut self, positions: &[Location], padding_px: u32) {
        self.borrow_mut().fit_bounds(positions, padding_px);
    }

    fn fly_to(&mut self, position: Location, zoom: f64) {
        self.borrow_mut().fly_to(position, zoom);
    }
}
