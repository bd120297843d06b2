//! On-chain version extractor
//!
//! Reads the version a compiled contract declares by executing its
//! parameterless version function in a throwaway EVM. Contracts that
//! predate the convention (no such function, or any other failure) resolve
//! to the default version instead of aborting the run.
//!
//! # Examples
//!
//! ```
//! use contract_semver::extractor::{Artifact, BuildArtifacts, ContractVersions};
//! use contract_semver::version::ContractVersion;
//!
//! // Runtime code returning the words 1, 2, 3, 4
//! let code = "0x60016000526002602052600360405260046060526080 6000f3".replace(' ', "");
//! let artifacts = BuildArtifacts::new(vec![
//!     Artifact::new("Versioned", code),
//!     Artifact::new("Legacy", "0x00"),
//! ]);
//!
//! let versions = ContractVersions::from_artifacts(&artifacts);
//! assert_eq!(versions["Versioned"], ContractVersion::new(1, 2, 3, 4));
//! assert_eq!(versions["Legacy"], ContractVersion::INITIAL);
//! ```

pub mod artifacts;
pub mod error;
pub mod evm;
pub mod linker;

pub use artifacts::{Artifact, BuildArtifacts};
pub use error::{ArtifactError, ExtractionError};

use crate::config::ExtractorConfig;
use crate::version::{ContractVersion, VERSION_BUFFER_LEN};
use log::{debug, info, warn};
use rayon::prelude::*;
use revm::primitives::{hex, keccak256, Bytes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Signature of the version function called by default
pub const DEFAULT_VERSION_SIGNATURE: &str = "getVersionNumber()";

/// Versions keyed by contract name
pub type ContractVersionMap = BTreeMap<String, ContractVersion>;

/// How the 128 bytes returned by the version function are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BufferDecoding {
    /// Each word's hex text read as a decimal number
    #[default]
    HexDigits,
    /// Each word read as a big-endian unsigned integer
    Integer,
}

impl BufferDecoding {
    /// Decode a version buffer with this scheme
    pub fn decode(self, buf: &[u8]) -> Result<ContractVersion, ExtractionError> {
        let version = match self {
            BufferDecoding::HexDigits => ContractVersion::from_buffer(buf)?,
            BufferDecoding::Integer => ContractVersion::from_abi_words(buf)?,
        };
        Ok(version)
    }
}

/// Where a resolved version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionSource {
    /// Read from the bytecode
    Extracted,
    /// Extraction failed and the default version was used
    Defaulted,
}

/// A resolved version and whether it was actually read from bytecode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedVersion {
    /// Resolved version
    pub version: ContractVersion,
    /// Origin of `version`
    pub source: VersionSource,
}

/// Four-byte selector of a function signature
///
/// # Examples
///
/// ```
/// use contract_semver::extractor::function_selector;
///
/// assert_eq!(function_selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
/// ```
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Version discovery over compiled bytecode
pub struct ContractVersions;

impl ContractVersions {
    /// Read the version declared by `bytecode`, falling back to `1.0.0.0`
    pub fn get_contract_version(bytecode: &str) -> ContractVersion {
        Self::resolve(bytecode, &ExtractorConfig::default()).version
    }

    /// Read the version declared by `bytecode`, reporting every failure
    ///
    /// `bytecode` is hex (with or without `0x`) and may contain library
    /// link placeholders.
    pub fn extract(
        bytecode: &str,
        config: &ExtractorConfig,
    ) -> Result<ContractVersion, ExtractionError> {
        let linked = linker::link_placeholders(bytecode);
        let code = hex::decode(linked.trim().trim_start_matches("0x"))
            .map_err(|e| ExtractionError::InvalidHex(e.to_string()))?;

        let calldata = Bytes::copy_from_slice(&function_selector(&config.selector_signature));
        let output = evm::static_call(Bytes::from(code), calldata, config.gas_limit)?;

        if output.len() != VERSION_BUFFER_LEN {
            return Err(ExtractionError::UnexpectedLength {
                actual: output.len(),
                expected: VERSION_BUFFER_LEN,
            });
        }

        config.buffer_decoding.decode(&output)
    }

    /// Read the version declared by `bytecode`, substituting the configured
    /// default on any failure
    pub fn resolve(bytecode: &str, config: &ExtractorConfig) -> ExtractedVersion {
        Self::resolve_logged(None, bytecode, config)
    }

    fn resolve_logged(
        contract_name: Option<&str>,
        bytecode: &str,
        config: &ExtractorConfig,
    ) -> ExtractedVersion {
        match Self::extract(bytecode, config) {
            Ok(version) => {
                debug!(
                    "{}: version {}",
                    contract_name.unwrap_or("<bytecode>"),
                    version
                );
                ExtractedVersion {
                    version,
                    source: VersionSource::Extracted,
                }
            }
            Err(e) => {
                match contract_name {
                    Some(name) => warn!(
                        "{}: no version read from bytecode ({}), using {}",
                        name, e, config.default_version
                    ),
                    None => debug!("Falling back to {}: {}", config.default_version, e),
                }
                ExtractedVersion {
                    version: config.default_version,
                    source: VersionSource::Defaulted,
                }
            }
        }
    }

    /// Versions of every artifact, using the default settings
    pub fn from_artifacts(artifacts: &BuildArtifacts) -> ContractVersionMap {
        Self::from_artifacts_with_config(artifacts, &ExtractorConfig::default())
    }

    /// Versions of every artifact
    pub fn from_artifacts_with_config(
        artifacts: &BuildArtifacts,
        config: &ExtractorConfig,
    ) -> ContractVersionMap {
        Self::from_artifacts_detailed(artifacts, config)
            .into_iter()
            .map(|(name, extracted)| (name, extracted.version))
            .collect()
    }

    /// Versions of every artifact, flagging which ones fell back to the
    /// default
    ///
    /// Artifacts are queried in parallel; a failure only affects its own
    /// entry.
    pub fn from_artifacts_detailed(
        artifacts: &BuildArtifacts,
        config: &ExtractorConfig,
    ) -> BTreeMap<String, ExtractedVersion> {
        let resolved: BTreeMap<String, ExtractedVersion> = artifacts
            .list_artifacts()
            .par_iter()
            .map(|artifact| {
                let extracted = Self::resolve_logged(
                    Some(artifact.contract_name.as_str()),
                    &artifact.deployed_bytecode,
                    config,
                );
                (artifact.contract_name.clone(), extracted)
            })
            .collect();

        let defaulted = resolved
            .values()
            .filter(|v| v.source == VersionSource::Defaulted)
            .count();
        info!(
            "Resolved {} contract version(s), {} defaulted",
            resolved.len(),
            defaulted
        );
        resolved
    }
}
