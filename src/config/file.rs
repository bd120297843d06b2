//! Configuration file data structures

use crate::extractor::{BufferDecoding, DEFAULT_VERSION_SIGNATURE};
use crate::version::ContractVersion;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".contract-semver.toml";

/// Default gas budget for one version call
pub const DEFAULT_GAS_LIMIT: u64 = 10_000_000;

/// Intrinsic cost of the version call transaction: base fee plus four non-zero
/// selector bytes. A gas limit must exceed it to execute anything.
pub const INTRINSIC_GAS: u64 = 21_000 + 4 * 16;

/// contract-semver configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Regex of contract names left out of the analysis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// On-chain version extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl ConfigFile {
    /// Compiled exclusion pattern, if one is configured
    pub fn exclude_pattern(&self) -> Result<Option<Regex>> {
        self.exclude
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("Invalid exclude pattern '{}'", pattern))
            })
            .transpose()
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.exclude_pattern()?;
        self.extractor.validate()
    }
}

/// Settings for the on-chain version extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExtractorConfig {
    /// Parameterless view function returning the version
    pub selector_signature: String,

    /// Gas available to the call (bounds interpreter steps)
    pub gas_limit: u64,

    /// Version assumed when none can be read
    pub default_version: ContractVersion,

    /// How returned version words are decoded
    pub buffer_decoding: BufferDecoding,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            selector_signature: DEFAULT_VERSION_SIGNATURE.to_string(),
            gas_limit: DEFAULT_GAS_LIMIT,
            default_version: ContractVersion::INITIAL,
            buffer_decoding: BufferDecoding::default(),
        }
    }
}

impl ExtractorConfig {
    /// Validate extractor settings
    ///
    /// The signature must name a function without parameters and the gas
    /// limit must exceed [`INTRINSIC_GAS`] so the call can execute.
    pub fn validate(&self) -> Result<()> {
        if self.gas_limit <= INTRINSIC_GAS {
            anyhow::bail!(
                "Extractor gas limit {} must be greater than the {} gas the call costs up front",
                self.gas_limit,
                INTRINSIC_GAS
            );
        }

        let signature_re = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*\(\)$")?;
        if !signature_re.is_match(&self.selector_signature) {
            anyhow::bail!(
                "Version function '{}' must be a parameterless signature like '{}'",
                self.selector_signature,
                DEFAULT_VERSION_SIGNATURE
            );
        }

        Ok(())
    }
}
