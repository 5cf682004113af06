//! The discovery engine: orchestration of search, enrichment, markers, and
//! filters.
//!
//! One engine instance owns the result list, the selected identity, the
//! marker registry, and the active filter set; no external caller mutates
//! them directly. The only suspension points are provider and geocoder
//! calls. Staleness is enforced with monotonically increasing sequence
//! tokens, one for the list-search family (postal/address) and an
//! independent one for click searches: a response whose token is no longer
//! current is discarded, never applied. That gate — not network
//! cancellation — is the cancellation contract.

use std::collections::HashSet;

use chrono::Utc;
use serde_json::Value;

use plat_config::MapConfig;
use plat_core::property::Location;
use plat_core::{
    CanonicalProperty, PayloadSource, PropertyIdentity, SearchQuery, normalize,
};

use crate::error::{SearchError, SelectError};
use crate::filter::{self, FilterSet};
use crate::markers::{MapSurface, MarkerAction, MarkerRegistry, MarkerVisual};
use crate::merge::{fold_fragment, merge_fragment};
use crate::source::{HistorySink, PropertySource, SearchEvent};

/// Property discovery engine, generic over its collaborators.
pub struct DiscoveryEngine<S, M, H> {
    source: S,
    map: M,
    history: H,
    map_cfg: MapConfig,

    results: Vec<CanonicalProperty>,
    click_result: Option<CanonicalProperty>,
    selected: Option<PropertyIdentity>,
    markers: MarkerRegistry,

    filters: FilterSet,
    filter_defaults: FilterSet,

    list_seq: u64,
    click_seq: u64,
    enriching: HashSet<PropertyIdentity>,
}

impl<S, M, H> DiscoveryEngine<S, M, H>
where
    S: PropertySource,
    M: MapSurface,
    H: HistorySink,
{
    #[must_use]
    pub fn new(source: S, map: M, history: H, map_cfg: MapConfig) -> Self {
        let defaults = FilterSet::defaults_for(&[]);
        Self {
            source,
            map,
            history,
            map_cfg,
            results: Vec::new(),
            click_result: None,
            selected: None,
            markers: MarkerRegistry::default(),
            filters: defaults.clone(),
            filter_defaults: defaults,
            list_seq: 0,
            click_seq: 0,
            enriching: HashSet::new(),
        }
    }

    // -- search ------------------------------------------------------------

    /// Run a search. Results land in engine state; an empty result set is a
    /// success, and a superseded (stale) response changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] when the provider or geocoder call fails.
    pub async fn search(&mut self, query: SearchQuery) -> Result<(), SearchError> {
        match query {
            SearchQuery::Postal { ref code } => {
                let token = self.begin_list_search();
                let outcome = self.source.search_by_postal(code).await;
                self.finish_list_search(token, &query, outcome).await
            }
            SearchQuery::Address {
                ref line1,
                ref line2,
            } => {
                let token = self.begin_list_search();
                let outcome = self.source.search_by_address(line1, line2).await;
                self.finish_list_search(token, &query, outcome).await
            }
            SearchQuery::Click { lat, lng } => self.click_search(lat, lng).await,
        }
    }

    /// Issue a new list-search token, marking any in-flight list search
    /// stale.
    pub fn begin_list_search(&mut self) -> u64 {
        self.list_seq += 1;
        self.list_seq
    }

    /// Install list-search payloads if `token` is still current.
    ///
    /// Returns `false` when the response was stale and discarded. On
    /// install: one canonical record per distinct identity, the marker set
    /// replaced wholesale, the camera fit to marker bounds, and the filter
    /// set reset to the new pool's defaults.
    pub fn apply_list_results(&mut self, token: u64, payloads: &[Value]) -> bool {
        if token != self.list_seq {
            tracing::debug!(token, current = self.list_seq, "discarding stale list response");
            return false;
        }

        let mut list = Vec::new();
        for payload in payloads {
            match normalize(PayloadSource::Search, payload) {
                Ok(frag) => {
                    fold_fragment(&mut list, &frag);
                }
                Err(e) => tracing::warn!(%e, "dropping unnormalizable payload"),
            }
        }

        self.results = list;
        self.selected = None;
        self.markers
            .replace_all(&mut self.map, &self.results, self.map_cfg.fit_padding_px);
        self.filter_defaults = FilterSet::defaults_for(&self.results);
        self.filters = self.filter_defaults.clone();
        true
    }

    async fn finish_list_search(
        &mut self,
        token: u64,
        query: &SearchQuery,
        outcome: Result<Vec<Value>, crate::source::SourceError>,
    ) -> Result<(), SearchError> {
        match outcome {
            Err(e) => {
                if token != self.list_seq {
                    tracing::debug!(%e, "stale list search failed; ignoring");
                    return Ok(());
                }
                Err(e.into())
            }
            Ok(payloads) => {
                if self.apply_list_results(token, &payloads) {
                    self.emit_history(query.describe(), &self.results).await;
                }
                Ok(())
            }
        }
    }

    /// Issue a new click-search token, marking any in-flight click stale.
    pub fn begin_click_search(&mut self) -> u64 {
        self.click_seq += 1;
        self.click_seq
    }

    /// Install click-lookup payloads if `token` is still current.
    ///
    /// Returns `false` when the response was stale and discarded. On
    /// install the click result mirrors the singleton click marker: a
    /// resolved record replaces it (marker back to `Default`), an empty
    /// lookup clears it and marks the click `Error`.
    pub fn apply_click_results(&mut self, token: u64, payloads: &[Value]) -> bool {
        if token != self.click_seq {
            tracing::debug!(token, current = self.click_seq, "discarding stale click response");
            return false;
        }

        let mut found = Vec::new();
        for payload in payloads {
            match normalize(PayloadSource::Search, payload) {
                Ok(frag) => {
                    fold_fragment(&mut found, &frag);
                }
                Err(e) => tracing::warn!(%e, "dropping unnormalizable click payload"),
            }
        }

        match found.into_iter().next() {
            Some(record) => {
                self.markers.set_click_visual(&mut self.map, MarkerVisual::Default);
                self.click_result = Some(record);
            }
            None => {
                self.markers.set_click_visual(&mut self.map, MarkerVisual::Error);
                self.click_result = None;
            }
        }
        true
    }

    /// Click flow: provisional marker and camera move immediately, then
    /// reverse-geocode, then an address search for the resolved address.
    /// No resolvable address leaves the click marker in `Error` without a
    /// single provider lookup.
    async fn click_search(&mut self, lat: f64, lng: f64) -> Result<(), SearchError> {
        let token = self.begin_click_search();
        let position = Location {
            latitude: lat,
            longitude: lng,
        };
        self.markers
            .place_click(&mut self.map, position, MarkerVisual::Pending);
        // The explicit user click is one of the two camera triggers.
        self.map.fly_to(position, self.map_cfg.click_zoom);

        let resolved = self.source.reverse_geocode(lat, lng).await;
        if token != self.click_seq {
            tracing::debug!("discarding stale click geocode");
            return Ok(());
        }
        let address = match resolved {
            Err(e) => {
                self.markers.set_click_visual(&mut self.map, MarkerVisual::Error);
                return Err(e.into());
            }
            // Water, closed roads: expected outcome, no provider lookup.
            Ok(None) => {
                self.markers.set_click_visual(&mut self.map, MarkerVisual::Error);
                return Ok(());
            }
            Ok(Some(address)) => address,
        };

        let outcome = self
            .source
            .search_by_address(&address.line1, &address.line2)
            .await;
        let payloads = match outcome {
            Err(e) => {
                if token != self.click_seq {
                    tracing::debug!(%e, "stale click lookup failed; ignoring");
                    return Ok(());
                }
                self.markers.set_click_visual(&mut self.map, MarkerVisual::Error);
                return Err(e.into());
            }
            Ok(payloads) => payloads,
        };
        if !self.apply_click_results(token, &payloads) {
            return Ok(());
        }

        if let Some(record) = &self.click_result {
            let description = format!("click:{}", address.display_name);
            self.emit_history(description, std::slice::from_ref(record)).await;
        }
        Ok(())
    }

    // -- selection & enrichment --------------------------------------------

    /// Select a record by identity, enriching it when it is still a
    /// lightweight search result.
    ///
    /// Enrichment issues the detail, owner, and events calls concurrently
    /// and merges whichever succeed; if all fail the record keeps its prior
    /// completeness and this still returns `Ok`. An identity whose
    /// enrichment is already in flight is not fetched again.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::UnknownIdentity`] when the engine holds no
    /// record for `identity`.
    pub async fn select(&mut self, identity: &PropertyIdentity) -> Result<(), SelectError> {
        let Some(record) = self.record(identity) else {
            return Err(SelectError::UnknownIdentity(identity.clone()));
        };
        let needs_detail = record.needs_detail();
        let provider_id = record.provider_id.clone();

        self.selected = Some(identity.clone());
        self.markers.select(&mut self.map, identity);

        if !needs_detail {
            return Ok(());
        }
        let Some(provider_id) = provider_id else {
            tracing::debug!(%identity, "record has no provider id; skipping enrichment");
            return Ok(());
        };
        if !self.enriching.insert(identity.clone()) {
            tracing::debug!(%identity, "enrichment already in flight");
            return Ok(());
        }

        // Pending only because this selection triggered the fetch.
        self.markers
            .set_visual(&mut self.map, identity, MarkerVisual::Pending);

        let (detail, owner, events) = tokio::join!(
            self.source.detail(&provider_id),
            self.source.owner(&provider_id),
            self.source.sale_history(&provider_id),
        );
        self.enriching.remove(identity);

        let mut failures = 0_u8;
        for (source, outcome) in [
            (PayloadSource::Detail, detail),
            (PayloadSource::Owner, owner),
            (PayloadSource::Events, events),
        ] {
            match outcome {
                Ok(Some(payload)) => match normalize(source, &payload) {
                    Ok(frag) => {
                        if let Some(record) = self.record_mut(identity) {
                            merge_fragment(record, &frag);
                        }
                    }
                    Err(e) => tracing::warn!(%e, "dropping unnormalizable enrichment payload"),
                },
                Ok(None) => {}
                Err(e) => {
                    failures += 1;
                    tracing::warn!(%identity, endpoint = %source, %e, "enrichment call failed");
                }
            }
        }
        if failures > 0 {
            // Partial (or total) failure is recovered locally: the record
            // keeps whatever succeeded and stays summary if detail failed.
            tracing::warn!(%identity, failures, "enrichment incomplete");
        }

        self.markers
            .set_visual(&mut self.map, identity, MarkerVisual::Selected);
        Ok(())
    }

    /// Route a marker popup action. `View` selects (and enriches) the
    /// record; `Save` hands a snapshot of it back for the caller's
    /// persistence layer.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::UnknownIdentity`] when the engine holds no
    /// record for `identity`.
    pub async fn on_marker_action(
        &mut self,
        identity: &PropertyIdentity,
        action: MarkerAction,
    ) -> Result<Option<CanonicalProperty>, SelectError> {
        match action {
            MarkerAction::View => {
                self.select(identity).await?;
                Ok(None)
            }
            MarkerAction::Save => self
                .record(identity)
                .cloned()
                .map(Some)
                .ok_or_else(|| SelectError::UnknownIdentity(identity.clone())),
        }
    }

    // -- filters -----------------------------------------------------------

    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
    }

    /// The visible subset: filter engine re-run over the current pool.
    #[must_use]
    pub fn filtered(&self) -> Vec<CanonicalProperty> {
        filter::apply(&self.results, &self.filters, &self.filter_defaults)
    }

    // -- accessors ---------------------------------------------------------

    #[must_use]
    pub fn results(&self) -> &[CanonicalProperty] {
        &self.results
    }

    #[must_use]
    pub fn selected(&self) -> Option<&CanonicalProperty> {
        let id = self.selected.as_ref()?;
        self.record(id)
    }

    #[must_use]
    pub fn click_result(&self) -> Option<&CanonicalProperty> {
        self.click_result.as_ref()
    }

    #[must_use]
    pub const fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    #[must_use]
    pub const fn filter_defaults(&self) -> &FilterSet {
        &self.filter_defaults
    }

    #[must_use]
    pub fn enrichment_in_flight(&self, identity: &PropertyIdentity) -> bool {
        self.enriching.contains(identity)
    }

    fn record(&self, identity: &PropertyIdentity) -> Option<&CanonicalProperty> {
        self.results
            .iter()
            .find(|r| r.identity == *identity)
            .or_else(|| {
                self.click_result
                    .as_ref()
                    .filter(|r| r.identity == *identity)
            })
    }

    fn record_mut(&mut self, identity: &PropertyIdentity) -> Option<&mut CanonicalProperty> {
        if let Some(idx) = self.results.iter().position(|r| r.identity == *identity) {
            return self.results.get_mut(idx);
        }
        self.click_result
            .as_mut()
            .filter(|r| r.identity == *identity)
    }

    /// Fire-and-forget history event; sink failures never affect the flow.
    async fn emit_history(&self, description: String, results: &[CanonicalProperty]) {
        let event = SearchEvent {
            description,
            result_count: results.len(),
            sample: results
                .iter()
                .take(self.map_cfg.max_history_sample)
                .map(|r| r.address.one_line())
                .collect(),
            at: Utc::now(),
        };
        if let Err(e) = self.history.record(event).await {
            tracing::warn!(%e, "search-history sink failed");
        }
    }
}
