//! Versioned report builder
//!
//! Combines categorized changes with the version algebra, for the whole
//! codebase and per contract, and cross-checks the result against the
//! versions deployed bytecode reports.

pub mod drift;
pub mod versioned;

pub use drift::VersionDrift;
pub use versioned::{AstDetailedVersionedReport, AstVersionedReport, AstVersionedReportIndex};
