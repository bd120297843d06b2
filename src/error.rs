//! Crate-level error type with contextual suggestions
//!
//! Module errors ([`VersionError`], [`ArtifactError`]) convert into
//! [`SemverError`], which adds the release gates raised by
//! [`ReleaseChecker`](crate::check::ReleaseChecker).
//!
//! # Examples
//!
//! ```
//! use contract_semver::error::SemverError;
//!
//! let error = SemverError::StorageIncompatible {
//!     contracts: vec!["Vault".to_string()],
//! };
//! assert!(error.to_string().contains("Vault"));
//! assert!(error.suggestion().unwrap().contains("storage"));
//! ```

use crate::extractor::ArtifactError;
use crate::version::VersionError;
use thiserror::Error;

/// Errors surfaced by the release check
#[derive(Error, Debug)]
pub enum SemverError {
    /// Configured exclude pattern is not a valid regex
    #[error("Invalid exclude pattern '{pattern}'")]
    InvalidExcludePattern {
        /// Offending pattern
        pattern: String,
        #[source]
        /// Regex compilation error
        source: regex::Error,
    },

    /// Version parsing or arithmetic failed
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Build artifacts could not be loaded
    #[error(transparent)]
    Artifacts(#[from] ArtifactError),

    /// At least one contract changed its storage layout incompatibly
    #[error("Storage layout is incompatible for: {}", contracts.join(", "))]
    StorageIncompatible {
        /// Contracts with incompatible layouts
        contracts: Vec<String>,
    },

    /// Deployed bytecode reports versions other than the changes imply
    #[error(
        "{} contract(s) report an unexpected version: {}",
        contracts.len(),
        contracts.join(", ")
    )]
    VersionDrift {
        /// Contracts whose reported version drifted
        contracts: Vec<String>,
    },
}

impl SemverError {
    /// Get actionable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::InvalidExcludePattern { .. } => Some(
                "Fix the 'exclude' regex in .contract-semver.toml (e.g. \"^(Migrations|Mock.*)$\")"
                    .to_string(),
            ),
            Self::Version(VersionError::Format(_)) => Some(
                "Versions have four numeric components: storage.major.minor.patch".to_string(),
            ),
            Self::Version(VersionError::Invariant(_)) => None,
            Self::Artifacts(_) => Some(
                "Rebuild the contracts so the build directory holds valid artifacts".to_string(),
            ),
            Self::StorageIncompatible { .. } => Some(
                "Restore the previous storage layout or deploy behind a new proxy".to_string(),
            ),
            Self::VersionDrift { .. } => Some(
                "Update getVersionNumber() to return the version the changes imply".to_string(),
            ),
        }
    }
}

/// Plain-text error formatter for release tooling
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        let mut output = format!("error: {}\n", error);

        // Error chain (caused by)
        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!("{}caused by: {}\n", "  ".repeat(indent), err));
            source = err.source();
            indent += 1;
        }

        if let Some(suggestion) = error
            .downcast_ref::<SemverError>()
            .and_then(SemverError::suggestion)
        {
            output.push_str(&format!("\nhelp: {}\n", suggestion));
        }

        output
    }
}
