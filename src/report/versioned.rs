//! Versioned reports: categorized changes paired with the delta they imply

use crate::categorize::{ApiChange, AstReports, CategorizedChanges, Categorizer, ContractScoped};
use crate::version::{ContractVersionDelta, Delta};
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-contract versioned reports, keyed by contract name
pub type AstVersionedReportIndex<C = ApiChange> = BTreeMap<String, AstVersionedReport<C>>;

/// Categorized changes and the version delta they require
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstVersionedReport<C = ApiChange> {
    /// Bucketed changes
    pub changes: CategorizedChanges<C>,
    /// Delta derived from which buckets are non-empty
    pub delta: ContractVersionDelta,
}

impl<C: ContractScoped + Clone> AstVersionedReport<C> {
    /// Wrap `changes` with the delta its non-empty buckets trigger
    pub fn create(changes: CategorizedChanges<C>) -> Self {
        let delta = ContractVersionDelta::from_changes(
            !changes.storage.is_empty(),
            !changes.major.is_empty(),
            !changes.minor.is_empty(),
            !changes.patch.is_empty(),
        );
        Self { changes, delta }
    }

    /// One independent report per contract referenced by `changes`
    pub fn create_by_contract(changes: &CategorizedChanges<C>) -> AstVersionedReportIndex<C> {
        changes
            .by_contract()
            .into_iter()
            .map(|(name, scoped)| (name, Self::create(scoped)))
            .collect()
    }
}

impl<C> AstVersionedReport<C> {
    /// Name of the component this report bumps, or `none`
    pub fn bump(&self) -> &'static str {
        let components = [
            ("storage", self.delta.storage),
            ("major", self.delta.major),
            ("minor", self.delta.minor),
            ("patch", self.delta.patch),
        ];
        components
            .iter()
            .find(|(_, delta)| *delta == Delta::Increment)
            .map_or("none", |(name, _)| *name)
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} bump ({}): {} storage, {} major, {} minor, {} patch",
            self.bump(),
            self.delta,
            self.changes.storage.len(),
            self.changes.major.len(),
            self.changes.minor.len(),
            self.changes.patch.len()
        )
    }
}

/// Global versioned report plus one report per contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstDetailedVersionedReport<C = ApiChange> {
    /// Report over the whole codebase
    pub global: AstVersionedReport<C>,
    /// Reports scoped to each contract
    pub contracts: AstVersionedReportIndex<C>,
}

impl<C: ContractScoped + Clone> AstDetailedVersionedReport<C> {
    /// Categorize `reports` and derive global and per-contract deltas
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_semver::categorize::{ApiChange, AstReports, ChangeCategory};
    /// use contract_semver::report::AstDetailedVersionedReport;
    /// use contract_semver::version::Delta;
    ///
    /// let reports = AstReports::new(
    ///     vec![ApiChange::new("Token", "function-removed"), ApiChange::new("Vault", "body")],
    ///     vec![],
    /// );
    /// let policy = |c: &ApiChange| {
    ///     if c.kind == "function-removed" { ChangeCategory::Major } else { ChangeCategory::Patch }
    /// };
    ///
    /// let report = AstDetailedVersionedReport::create(&reports, &policy);
    /// assert_eq!(report.global.delta.major, Delta::Increment);
    /// assert_eq!(report.contracts["Vault"].delta.patch, Delta::Increment);
    /// assert_eq!(report.contracts["Vault"].delta.major, Delta::None);
    /// ```
    pub fn create<P>(reports: &AstReports<C>, categorizer: &P) -> Self
    where
        P: Categorizer<C> + ?Sized,
    {
        let changes = CategorizedChanges::from_reports(reports, categorizer);
        let contracts = AstVersionedReport::create_by_contract(&changes);
        let global = AstVersionedReport::create(changes);

        info!(
            "Versioned report: {} across {} contract(s)",
            global.bump(),
            contracts.len()
        );
        for (name, report) in &contracts {
            debug!("  {}: {}", name, report.summary());
        }

        Self { global, contracts }
    }

    /// Same as [`AstDetailedVersionedReport::create`] after dropping
    /// contracts whose name matches `exclude`
    pub fn create_excluding<P>(
        reports: &AstReports<C>,
        categorizer: &P,
        exclude: Option<&Regex>,
    ) -> Self
    where
        P: Categorizer<C> + ?Sized,
    {
        Self::create(&reports.excluding(exclude), categorizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::{ChangeCategory, StorageCompatibilityReport};

    fn policy(change: &ApiChange) -> ChangeCategory {
        match change.kind.as_str() {
            "removed" => ChangeCategory::Major,
            "added" => ChangeCategory::Minor,
            _ => ChangeCategory::Patch,
        }
    }

    #[test]
    fn test_create_triggers_on_any_entry() {
        let mut changes = CategorizedChanges::default();
        changes.minor.push(ApiChange::new("A", "added"));
        changes.patch.push(ApiChange::new("A", "body"));
        changes.patch.push(ApiChange::new("B", "body"));

        let report = AstVersionedReport::create(changes);
        assert_eq!(
            report.delta,
            ContractVersionDelta::from_changes(false, false, true, true)
        );
        assert_eq!(report.bump(), "minor");
    }

    #[test]
    fn test_create_with_no_changes_is_unchanged() {
        let report = AstVersionedReport::<ApiChange>::create(CategorizedChanges::default());
        assert!(report.delta.is_unchanged());
        assert_eq!(report.bump(), "none");
    }

    #[test]
    fn test_per_contract_delta_is_independent_of_global() {
        let reports = AstReports::new(
            vec![
                ApiChange::new("Token", "removed"),
                ApiChange::new("Vault", "body"),
            ],
            vec![],
        );
        let report = AstDetailedVersionedReport::create(&reports, &policy);

        assert_eq!(report.global.bump(), "major");
        assert_eq!(report.contracts["Token"].bump(), "major");
        assert_eq!(report.contracts["Vault"].bump(), "patch");
        assert_eq!(report.contracts["Vault"].delta.major, Delta::None);
    }

    #[test]
    fn test_storage_break_dominates_global_report() {
        let reports = AstReports::new(
            vec![ApiChange::new("Token", "added")],
            vec![
                StorageCompatibilityReport::new("Vault", false),
                StorageCompatibilityReport::new("Token", true),
            ],
        );
        let report = AstDetailedVersionedReport::create(&reports, &policy);

        assert_eq!(report.global.bump(), "storage");
        assert_eq!(report.global.delta.minor, Delta::Reset);
        assert_eq!(report.contracts["Vault"].bump(), "storage");
        assert_eq!(report.contracts["Token"].bump(), "minor");
        assert_eq!(report.contracts.len(), 2);
    }

    #[test]
    fn test_create_excluding_drops_matching_contracts() {
        let reports = AstReports::new(
            vec![
                ApiChange::new("Migrations", "removed"),
                ApiChange::new("Token", "body"),
            ],
            vec![StorageCompatibilityReport::new("Migrations", false)],
        );
        let exclude = Regex::new("^Migrations$").unwrap();
        let report =
            AstDetailedVersionedReport::create_excluding(&reports, &policy, Some(&exclude));

        assert_eq!(report.global.bump(), "patch");
        assert!(!report.contracts.contains_key("Migrations"));
    }

    #[test]
    fn test_summary_mentions_bump_and_counts() {
        let mut changes = CategorizedChanges::default();
        changes.major.push(ApiChange::new("A", "removed"));
        let summary = AstVersionedReport::create(changes).summary();

        assert!(summary.starts_with("major bump"));
        assert!(summary.contains("1 major"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let reports = AstReports::new(vec![ApiChange::new("Token", "added")], vec![]);
        let report = AstDetailedVersionedReport::create(&reports, &policy);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["global"]["delta"]["minor"], "increment");
        assert_eq!(
            json["contracts"]["Token"]["changes"]["minor"][0]["contractName"],
            "Token"
        );
    }
}
