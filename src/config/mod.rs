//! Configuration for contract-semver
//!
//! This module provides:
//! - .contract-semver.toml config file support
//! - Exclusion pattern and extractor settings

pub mod file;
pub mod loader;

pub use file::{ConfigFile, ExtractorConfig, CONFIG_FILE_NAME, DEFAULT_GAS_LIMIT, INTRINSIC_GAS};
pub use loader::ConfigLoader;
