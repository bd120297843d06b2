//! Categorized change buckets, globally and per contract

use super::categorizer::{Categorizer, ChangeCategory};
use super::reports::{ApiChange, AstReports, ContractScoped, StorageCompatibilityReport};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-contract categorized changes, keyed by contract name
pub type CategorizedChangesIndex<C = ApiChange> = BTreeMap<String, CategorizedChanges<C>>;

/// Changes partitioned into storage, major, minor and patch buckets
///
/// Every incompatible storage report and every code change of the source
/// reports lands in exactly one bucket. Compatible storage reports are
/// dropped since they never require a bump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedChanges<C = ApiChange> {
    /// Incompatible storage reports
    pub storage: Vec<StorageCompatibilityReport>,
    /// Interface-breaking changes
    pub major: Vec<C>,
    /// Additive changes
    pub minor: Vec<C>,
    /// Internal changes
    pub patch: Vec<C>,
}

impl<C> Default for CategorizedChanges<C> {
    fn default() -> Self {
        Self {
            storage: Vec::new(),
            major: Vec::new(),
            minor: Vec::new(),
            patch: Vec::new(),
        }
    }
}

impl<C: ContractScoped + Clone> CategorizedChanges<C> {
    /// Partition `reports` using `categorizer`
    ///
    /// The categorizer is invoked exactly once per code change.
    pub fn from_reports<P>(reports: &AstReports<C>, categorizer: &P) -> Self
    where
        P: Categorizer<C> + ?Sized,
    {
        let mut builder = CategorizedChangesBuilder::new();

        for report in reports.storage().iter().filter(|r| !r.compatible) {
            builder.add_storage(report.clone());
        }

        for change in reports.changes() {
            let category = categorizer.categorize(change);
            builder.add_change(category, change.clone());
        }

        let changes = builder.build();
        debug!(
            "Categorized {} storage / {} major / {} minor / {} patch changes",
            changes.storage.len(),
            changes.major.len(),
            changes.minor.len(),
            changes.patch.len()
        );
        changes
    }

    /// Split the buckets by contract name
    ///
    /// Concatenating any bucket across all entries gives back the global
    /// bucket, and within a contract the original order is preserved.
    pub fn by_contract(&self) -> CategorizedChangesIndex<C> {
        let mut builders: BTreeMap<String, CategorizedChangesBuilder<C>> = BTreeMap::new();

        fn entry<'a, C>(
            builders: &'a mut BTreeMap<String, CategorizedChangesBuilder<C>>,
            name: &str,
        ) -> &'a mut CategorizedChangesBuilder<C> {
            builders
                .entry(name.to_string())
                .or_insert_with(CategorizedChangesBuilder::new)
        }

        for report in &self.storage {
            entry(&mut builders, report.contract_name()).add_storage(report.clone());
        }
        for (category, bucket) in [
            (ChangeCategory::Major, &self.major),
            (ChangeCategory::Minor, &self.minor),
            (ChangeCategory::Patch, &self.patch),
        ] {
            for change in bucket {
                entry(&mut builders, change.contract_name()).add_change(category, change.clone());
            }
        }

        builders
            .into_iter()
            .map(|(name, builder)| (name, builder.build()))
            .collect()
    }
}

impl<C> CategorizedChanges<C> {
    /// True when no bucket has any entry
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
            && self.major.is_empty()
            && self.minor.is_empty()
            && self.patch.is_empty()
    }

    /// Total number of entries across all buckets
    pub fn len(&self) -> usize {
        self.storage.len() + self.major.len() + self.minor.len() + self.patch.len()
    }

    /// True when at least one storage layout is incompatible
    pub fn has_storage_break(&self) -> bool {
        !self.storage.is_empty()
    }
}

/// Incremental builder for [`CategorizedChanges`]
#[derive(Debug)]
pub struct CategorizedChangesBuilder<C = ApiChange> {
    changes: CategorizedChanges<C>,
}

impl<C> Default for CategorizedChangesBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> CategorizedChangesBuilder<C> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            changes: CategorizedChanges::default(),
        }
    }

    /// Append an incompatible storage report
    pub fn add_storage(&mut self, report: StorageCompatibilityReport) -> &mut Self {
        self.changes.storage.push(report);
        self
    }

    /// Append a code change to the bucket for `category`
    pub fn add_change(&mut self, category: ChangeCategory, change: C) -> &mut Self {
        match category {
            ChangeCategory::Major => self.changes.major.push(change),
            ChangeCategory::Minor => self.changes.minor.push(change),
            ChangeCategory::Patch => self.changes.patch.push(change),
        }
        self
    }

    /// Finish building
    pub fn build(self) -> CategorizedChanges<C> {
        self.changes
    }
}
