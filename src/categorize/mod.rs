//! Change categorization engine
//!
//! Turns the flat diff output of two compiled codebases into storage,
//! major, minor and patch buckets, globally and per contract. Why a change
//! is major or minor is decided by an injected [`Categorizer`].

pub mod categorizer;
pub mod changes;
pub mod reports;

pub use categorizer::{Categorizer, ChangeCategory};
pub use changes::{CategorizedChanges, CategorizedChangesBuilder, CategorizedChangesIndex};
pub use reports::{ApiChange, AstReports, ContractScoped, StorageCompatibilityReport};
