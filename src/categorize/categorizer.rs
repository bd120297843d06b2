//! Change classification policy

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity class of a single code change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    /// Breaks the public interface
    Major,
    /// Extends the public interface
    Minor,
    /// Internal change only
    Patch,
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeCategory::Major => write!(f, "major"),
            ChangeCategory::Minor => write!(f, "minor"),
            ChangeCategory::Patch => write!(f, "patch"),
        }
    }
}

/// Policy deciding whether a change is major, minor or patch
///
/// Any `Fn(&C) -> ChangeCategory` is a categorizer.
///
/// # Examples
///
/// ```
/// use contract_semver::categorize::{ApiChange, Categorizer, ChangeCategory};
///
/// let policy = |change: &ApiChange| {
///     if change.kind.ends_with("-removed") {
///         ChangeCategory::Major
///     } else {
///         ChangeCategory::Minor
///     }
/// };
///
/// let change = ApiChange::new("Token", "function-removed");
/// assert_eq!(policy.categorize(&change), ChangeCategory::Major);
/// ```
pub trait Categorizer<C> {
    /// Classify a single change
    fn categorize(&self, change: &C) -> ChangeCategory;
}

impl<C, F> Categorizer<C> for F
where
    F: Fn(&C) -> ChangeCategory,
{
    fn categorize(&self, change: &C) -> ChangeCategory {
        self(change)
    }
}
