//! # plat-core
//!
//! Core types and payload normalization for Plat.
//!
//! This crate provides the foundational types shared across all Plat crates:
//! - The canonical property record and its field groups
//! - Stable identity derivation (provider id or deterministic address hash)
//! - The partial fragment type produced from a single provider payload
//! - The normalizer: one dispatch that turns any known payload shape into a
//!   fragment via per-field ordered extractor chains
//! - Query and completeness enums
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod extract;
pub mod fragment;
pub mod geocode;
pub mod identity;
pub mod normalize;
pub mod property;

pub use enums::{Completeness, PayloadSource, SearchQuery};
pub use errors::NormalizeError;
pub use fragment::PropertyFragment;
pub use geocode::GeocodedAddress;
pub use identity::PropertyIdentity;
pub use normalize::normalize;
pub use property::CanonicalProperty;
