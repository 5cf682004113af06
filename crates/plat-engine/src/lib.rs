//! # plat-engine
//!
//! Property discovery orchestration for Plat.
//!
//! This crate holds everything between the HTTP clients and the UI:
//! - The append-only merge engine (fragments → one record per identity)
//! - The filter engine (pure range/categorical predicates over the pool)
//! - The marker/viewport synchronizer (owned marker registry, camera rules)
//! - The discovery engine (search/select/filter operations with
//!   last-submission-wins staleness and deduplicated enrichment)
//!
//! The engine is generic over its collaborators — the property source, the
//! map surface, and the search-history sink — so applications wire in the
//! `plat-provider` clients and tests drive it with scripted fakes.

pub mod engine;
pub mod error;
pub mod filter;
pub mod markers;
pub mod merge;
pub mod source;

#[cfg(test)]
mod testutil;

pub use engine::DiscoveryEngine;
pub use error::{SearchError, SelectError};
pub use filter::{FilterSet, Range};
pub use markers::{MapSurface, MarkerAction, MarkerHandle, MarkerRegistry, MarkerVisual};
pub use source::{HistorySink, NullSink, PropertySource, SearchEvent, SourceError};
