//! Error types for on-chain version extraction

use crate::version::VersionError;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a version could not be read from bytecode
///
/// These are recovered into the default version by
/// [`ContractVersions`](super::ContractVersions) and only surface through
/// [`ContractVersions::extract`](super::ContractVersions::extract).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Bytecode is not valid hex once link placeholders are resolved
    #[error("Invalid bytecode hex: {0}")]
    InvalidHex(String),

    /// Interpreter rejected the bytecode or the call
    #[error("EVM execution failed: {0}")]
    Execution(String),

    /// The version function reverted (or does not exist)
    #[error("Version call reverted with {0} bytes of data")]
    Reverted(usize),

    /// Execution halted, e.g. out of gas or an attempted state change
    #[error("Version call halted: {0}")]
    Halted(String),

    /// Return data is not a four-word version
    #[error("Version call returned {actual} bytes, expected {expected}")]
    UnexpectedLength {
        /// Bytes returned
        actual: usize,
        /// Bytes a version occupies
        expected: usize,
    },

    /// Return data could not be decoded as a version
    #[error("Undecodable version data: {0}")]
    Decode(#[from] VersionError),
}

/// Errors that can occur while loading build artifacts
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// I/O error reading the build directory
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File or directory being read
        path: PathBuf,
        /// IO error source
        #[source]
        source: std::io::Error,
    },

    /// Artifact file is not valid JSON
    #[error("Failed to parse artifact {path}: {source}")]
    Parse {
        /// Artifact file
        path: PathBuf,
        /// JSON error source
        #[source]
        source: serde_json::Error,
    },
}
