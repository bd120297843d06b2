#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! contract-semver library
//!
//! Semantic versioning for upgradeable smart contracts. Versions have four
//! components, `storage.major.minor.patch`, where `storage` is bumped when
//! a contract's storage layout changes incompatibly.
//!
//! The library categorizes the diff between two compiled codebases, derives
//! the version bump each contract needs, and reads the version compiled
//! contracts actually declare by executing their version function in an
//! in-memory EVM.
//!
//! # Basic Example
//!
//! Applying a delta to a version:
//!
//! ```
//! use contract_semver::version::{ContractVersion, ContractVersionDelta};
//!
//! let previous: ContractVersion = "2.7.9.1".parse()?;
//!
//! // An additive change: minor increments, patch resets
//! let delta = ContractVersionDelta::from_changes(false, false, true, true);
//! assert_eq!(delta.applied_to(&previous)?.to_string(), "2.7.10.0");
//! # Ok::<(), contract_semver::version::VersionError>(())
//! ```
//!
//! # Advanced Example: Versioned Report
//!
//! Categorizing changes with a caller-supplied policy:
//!
//! ```
//! use contract_semver::categorize::{
//!     ApiChange, AstReports, ChangeCategory, StorageCompatibilityReport,
//! };
//! use contract_semver::report::AstDetailedVersionedReport;
//!
//! let reports = AstReports::new(
//!     vec![ApiChange::new("Token", "function-added")],
//!     vec![StorageCompatibilityReport::new("Vault", false)],
//! );
//! let policy = |_: &ApiChange| ChangeCategory::Minor;
//! let report = AstDetailedVersionedReport::create(&reports, &policy);
//!
//! assert_eq!(report.global.bump(), "storage");
//! assert_eq!(report.contracts["Token"].bump(), "minor");
//! assert_eq!(report.contracts["Vault"].bump(), "storage");
//! ```

/// Change categorization engine
pub mod categorize;
/// Release gate combining reports, extraction and drift detection
pub mod check;
/// Configuration file management
pub mod config;
/// Crate error type with contextual suggestions
pub mod error;
/// Version extraction from compiled bytecode
pub mod extractor;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Versioned reports and drift detection
pub mod report;
/// Version algebra
pub mod version;
