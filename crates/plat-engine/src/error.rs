//! Engine error types.
//!
//! Everything here is a typed outcome for the embedding UI to branch on —
//! no exception crosses a component boundary, and no variant is fatal.
//! Empty results, no-address clicks, and partial enrichment are not errors
//! at all; they surface through engine state.

use thiserror::Error;

use plat_core::PropertyIdentity;

use crate::source::SourceError;

/// A search could not complete. Retryable by user action, never
/// automatically.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// Transport never completed.
    #[error("network failure: {0}")]
    Network(String),

    /// Provider or geocoder responded but signaled failure.
    #[error("upstream failure: {detail}")]
    Upstream { detail: String },
}

impl From<SourceError> for SearchError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::Network(detail) => Self::Network(detail),
            SourceError::Upstream { detail } => Self::Upstream { detail },
        }
    }
}

/// A selection addressed a record the engine does not hold.
#[derive(Debug, Clone, Error)]
pub enum SelectError {
    #[error("unknown identity: {0}")]
    UnknownIdentity(PropertyIdentity),
}
