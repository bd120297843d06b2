//! Raw diff reports consumed by the categorization engine
//!
//! These types are produced by the AST diffing step that compares two
//! compiled codebases. The engine only relies on each record naming the
//! contract it belongs to.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record that belongs to a single named contract
pub trait ContractScoped {
    /// Name of the contract the record refers to
    fn contract_name(&self) -> &str;
}

/// One API-level difference in a contract, as emitted by the diff tool
///
/// Everything besides the contract name and the change kind is kept
/// verbatim in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChange {
    /// Contract the change was detected in
    pub contract_name: String,
    /// Diff tool's label for the change (e.g. `function-removed`)
    #[serde(default)]
    pub kind: String,
    /// Remaining fields of the diff record
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ApiChange {
    /// Create a change with no extra details
    pub fn new(contract_name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            contract_name: contract_name.into(),
            kind: kind.into(),
            details: Map::new(),
        }
    }
}

impl ContractScoped for ApiChange {
    fn contract_name(&self) -> &str {
        &self.contract_name
    }
}

/// Storage layout comparison for one contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageCompatibilityReport {
    /// Contract whose layout was compared
    pub contract_name: String,
    /// False when the new layout cannot safely replace the old one
    pub compatible: bool,
}

impl StorageCompatibilityReport {
    /// Create a storage report
    pub fn new(contract_name: impl Into<String>, compatible: bool) -> Self {
        Self {
            contract_name: contract_name.into(),
            compatible,
        }
    }
}

impl ContractScoped for StorageCompatibilityReport {
    fn contract_name(&self) -> &str {
        &self.contract_name
    }
}

/// Code changes and storage reports for a whole analyzed codebase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstReports<C = ApiChange> {
    /// Flat list of API changes across every contract
    pub changes: Vec<C>,
    /// One storage report per compared contract
    pub storage: Vec<StorageCompatibilityReport>,
}

impl<C> Default for AstReports<C> {
    fn default() -> Self {
        Self {
            changes: Vec::new(),
            storage: Vec::new(),
        }
    }
}

impl<C: ContractScoped + Clone> AstReports<C> {
    /// Pair a change list with its storage reports
    pub fn new(changes: Vec<C>, storage: Vec<StorageCompatibilityReport>) -> Self {
        Self { changes, storage }
    }

    /// All code changes
    pub fn changes(&self) -> &[C] {
        &self.changes
    }

    /// All storage reports
    pub fn storage(&self) -> &[StorageCompatibilityReport] {
        &self.storage
    }

    /// Copy of these reports without any record whose contract name matches
    /// `pattern`. `None` keeps everything.
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_semver::categorize::{ApiChange, AstReports, StorageCompatibilityReport};
    /// use regex::Regex;
    ///
    /// let reports = AstReports::new(
    ///     vec![ApiChange::new("Foo", "function-added"), ApiChange::new("Bar", "event-added")],
    ///     vec![StorageCompatibilityReport::new("Foo", false)],
    /// );
    /// let pattern = Regex::new("^Foo$").unwrap();
    /// let filtered = reports.excluding(Some(&pattern));
    ///
    /// assert_eq!(filtered.changes().len(), 1);
    /// assert!(filtered.storage().is_empty());
    /// assert_eq!(reports.changes().len(), 2);
    /// ```
    pub fn excluding(&self, pattern: Option<&Regex>) -> Self {
        let keep = |name: &str| pattern.map_or(true, |p| !p.is_match(name));

        Self {
            changes: self
                .changes
                .iter()
                .filter(|c| keep(c.contract_name()))
                .cloned()
                .collect(),
            storage: self
                .storage
                .iter()
                .filter(|s| keep(s.contract_name()))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AstReports {
        AstReports::new(
            vec![
                ApiChange::new("Foo", "function-removed"),
                ApiChange::new("FooBar", "function-added"),
                ApiChange::new("Bar", "event-added"),
                ApiChange::new("Foo", "modifier-changed"),
            ],
            vec![
                StorageCompatibilityReport::new("Foo", false),
                StorageCompatibilityReport::new("Bar", true),
            ],
        )
    }

    #[test]
    fn test_excluding_none_keeps_everything() {
        let reports = sample();
        assert_eq!(reports.excluding(None), reports);
    }

    #[test]
    fn test_excluding_anchored_pattern_only_drops_exact_name() {
        let reports = sample();
        let pattern = Regex::new("^Foo$").unwrap();
        let filtered = reports.excluding(Some(&pattern));

        let names: Vec<&str> = filtered
            .changes()
            .iter()
            .map(|c| c.contract_name())
            .collect();
        assert_eq!(names, vec!["FooBar", "Bar"]);
        assert_eq!(
            filtered.storage(),
            &[StorageCompatibilityReport::new("Bar", true)]
        );
    }

    #[test]
    fn test_excluding_unanchored_pattern_matches_substrings() {
        let reports = sample();
        let pattern = Regex::new("Foo").unwrap();
        let filtered = reports.excluding(Some(&pattern));

        assert_eq!(filtered.changes().len(), 1);
        assert_eq!(filtered.changes()[0].contract_name(), "Bar");
    }

    #[test]
    fn test_excluding_does_not_mutate_receiver() {
        let reports = sample();
        let before = reports.clone();
        let pattern = Regex::new(".*").unwrap();
        let filtered = reports.excluding(Some(&pattern));

        assert!(filtered.changes().is_empty());
        assert!(filtered.storage().is_empty());
        assert_eq!(reports, before);
    }

    #[test]
    fn test_api_change_keeps_unknown_fields() {
        let json = r#"{"contractName":"Token","kind":"removed","signature":"burn(uint256)"}"#;
        let change: ApiChange = serde_json::from_str(json).unwrap();

        assert_eq!(change.contract_name(), "Token");
        assert_eq!(change.kind, "removed");
        assert_eq!(change.details["signature"], "burn(uint256)");
    }
}
