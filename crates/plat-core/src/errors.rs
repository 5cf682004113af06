//! Cross-cutting error types for Plat.
//!
//! Domain-specific errors (e.g., `ProviderError`, `ConfigError`) live in
//! their respective crates. Normalization failures are defined here because
//! the normalizer is part of this crate and every other crate branches on
//! them.

use std::fmt;

/// A payload could not be turned into a fragment.
///
/// Never fatal: callers log the failure and merge nothing from the payload.
#[derive(Debug)]
pub enum NormalizeError {
    /// The payload matched no recognizable provider shape.
    UnrecognizedShape {
        /// Which endpoint produced the payload.
        source: crate::enums::PayloadSource,
    },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedShape { source } => {
                write!(f, "unrecognized payload shape from {source} endpoint")
            }
        }
    }
}

impl std::error::Error for NormalizeError {}
