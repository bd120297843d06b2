//! Release check combining categorization, extraction and drift detection
//!
//! Gates a release on two conditions:
//! - Storage: no contract may change its storage layout incompatibly
//! - Drift: the version each new contract reports must match the bump its
//!   changes imply

use crate::categorize::{AstReports, Categorizer, ContractScoped};
use crate::config::ConfigFile;
use crate::error::SemverError;
use crate::extractor::{BuildArtifacts, ContractVersionMap, ContractVersions};
use crate::report::{AstDetailedVersionedReport, VersionDrift};
use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Overall outcome of a release check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseStatus {
    /// Nothing changed
    Unchanged,
    /// Changes found and every version matches them
    Consistent,
    /// Some contract reports an unexpected version
    Drifted,
    /// Some storage layout is incompatible
    StorageBreak,
}

/// Everything computed by [`ReleaseChecker::check`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseResult<C = crate::categorize::ApiChange> {
    /// Versioned report of the filtered changes
    pub report: AstDetailedVersionedReport<C>,
    /// Versions reported by the previous build
    pub previous_versions: ContractVersionMap,
    /// Versions reported by the current build
    pub current_versions: ContractVersionMap,
    /// Contracts whose reported version disagrees with the report
    pub drift: Vec<VersionDrift>,
}

impl<C> ReleaseResult<C> {
    /// Status of the check, storage breaks taking priority
    pub fn status(&self) -> ReleaseStatus {
        if self.report.global.changes.has_storage_break() {
            ReleaseStatus::StorageBreak
        } else if !self.drift.is_empty() {
            ReleaseStatus::Drifted
        } else if self.report.global.delta.is_unchanged() {
            ReleaseStatus::Unchanged
        } else {
            ReleaseStatus::Consistent
        }
    }

    /// Exit code for CI (0 = pass, 1 = fail)
    pub fn exit_code(&self) -> i32 {
        match self.status() {
            ReleaseStatus::Unchanged | ReleaseStatus::Consistent => 0,
            ReleaseStatus::Drifted | ReleaseStatus::StorageBreak => 1,
        }
    }

    /// Fail if any contract changed its storage layout incompatibly
    pub fn ensure_upgrade_safe(&self) -> Result<(), SemverError> {
        let mut contracts: Vec<String> = self
            .report
            .global
            .changes
            .storage
            .iter()
            .map(|s| s.contract_name.clone())
            .collect();
        contracts.sort();
        contracts.dedup();

        if contracts.is_empty() {
            Ok(())
        } else {
            Err(SemverError::StorageIncompatible { contracts })
        }
    }

    /// Fail if any contract reports a version other than expected
    pub fn ensure_no_drift(&self) -> Result<(), SemverError> {
        if self.drift.is_empty() {
            return Ok(());
        }
        let contracts = self.drift.iter().map(|d| d.contract_name.clone());
        Err(SemverError::VersionDrift {
            contracts: contracts.collect(),
        })
    }
}

/// Runs the release check under one configuration
pub struct ReleaseChecker {
    config: ConfigFile,
}

impl ReleaseChecker {
    /// Create a new release checker
    pub fn new(config: ConfigFile) -> Self {
        Self { config }
    }

    /// Compiled exclude pattern
    pub fn exclude_pattern(&self) -> Result<Option<Regex>, SemverError> {
        self.config
            .exclude
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| SemverError::InvalidExcludePattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()
    }

    /// Categorize `reports`, read versions from both builds and compare
    ///
    /// Contracts matching the exclude pattern are dropped from the reports
    /// and from both version maps.
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_semver::categorize::{ApiChange, AstReports, ChangeCategory};
    /// use contract_semver::check::{ReleaseChecker, ReleaseStatus};
    /// use contract_semver::config::ConfigFile;
    /// use contract_semver::extractor::BuildArtifacts;
    ///
    /// let reports = AstReports::new(vec![ApiChange::new("Token", "added")], vec![]);
    /// let checker = ReleaseChecker::new(ConfigFile::default());
    /// let result = checker.check(
    ///     &reports,
    ///     &|_: &ApiChange| ChangeCategory::Minor,
    ///     &BuildArtifacts::default(),
    ///     &BuildArtifacts::default(),
    /// )?;
    ///
    /// assert_eq!(result.status(), ReleaseStatus::Consistent);
    /// assert_eq!(result.exit_code(), 0);
    /// # Ok::<(), contract_semver::error::SemverError>(())
    /// ```
    pub fn check<C, P>(
        &self,
        reports: &AstReports<C>,
        categorizer: &P,
        previous: &BuildArtifacts,
        current: &BuildArtifacts,
    ) -> Result<ReleaseResult<C>, SemverError>
    where
        C: ContractScoped + Clone,
        P: Categorizer<C> + ?Sized,
    {
        let exclude = self.exclude_pattern()?;
        let report =
            AstDetailedVersionedReport::create_excluding(reports, categorizer, exclude.as_ref());

        let keep = |name: &String| exclude.as_ref().map_or(true, |p| !p.is_match(name));
        let extract = |artifacts: &BuildArtifacts| -> ContractVersionMap {
            ContractVersions::from_artifacts_with_config(artifacts, &self.config.extractor)
                .into_iter()
                .filter(|(name, _)| keep(name))
                .collect()
        };
        let previous_versions = extract(previous);
        let current_versions = extract(current);

        let drift = VersionDrift::detect(&report, &previous_versions, &current_versions)?;

        let result = ReleaseResult {
            report,
            previous_versions,
            current_versions,
            drift,
        };
        info!(
            "Release check: {:?} ({})",
            result.status(),
            result.report.global.summary()
        );
        Ok(result)
    }
}
