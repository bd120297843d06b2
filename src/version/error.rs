//! Error types for the version algebra

use thiserror::Error;

/// Errors raised while parsing or transforming contract versions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Malformed version string or version buffer
    #[error("Invalid version format: {0}")]
    Format(String),

    /// Internal invariant violated while applying a delta
    #[error("Version invariant violated: {0}")]
    Invariant(String),
}
