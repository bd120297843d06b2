//! Drift between the version a report implies and the version bytecode reports

use super::versioned::AstDetailedVersionedReport;
use crate::version::{ContractVersion, ContractVersionDelta, VersionError};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A contract whose new bytecode reports an unexpected version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDrift {
    /// Contract name
    pub contract_name: String,
    /// Version reported by the previous bytecode
    pub previous: ContractVersion,
    /// Previous version with the contract's delta applied
    pub expected: ContractVersion,
    /// Version reported by the new bytecode
    pub reported: ContractVersion,
}

impl VersionDrift {
    /// Compare every contract present in both `previous` and `current`
    /// against the delta `report` computed for it.
    ///
    /// Contracts the report does not mention are expected to keep their
    /// version.
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_semver::categorize::{ApiChange, AstReports, ChangeCategory};
    /// use contract_semver::report::{AstDetailedVersionedReport, VersionDrift};
    /// use contract_semver::version::ContractVersion;
    /// use std::collections::BTreeMap;
    ///
    /// let reports = AstReports::new(vec![ApiChange::new("Token", "added")], vec![]);
    /// let policy = |_: &ApiChange| ChangeCategory::Minor;
    /// let report = AstDetailedVersionedReport::create(&reports, &policy);
    ///
    /// let previous = BTreeMap::from([("Token".to_string(), ContractVersion::new(1, 0, 0, 3))]);
    /// let current = BTreeMap::from([("Token".to_string(), ContractVersion::new(1, 0, 0, 3))]);
    ///
    /// let drift = VersionDrift::detect(&report, &previous, &current).unwrap();
    /// assert_eq!(drift.len(), 1);
    /// assert_eq!(drift[0].expected, ContractVersion::new(1, 0, 1, 0));
    /// ```
    pub fn detect<C>(
        report: &AstDetailedVersionedReport<C>,
        previous: &BTreeMap<String, ContractVersion>,
        current: &BTreeMap<String, ContractVersion>,
    ) -> Result<Vec<VersionDrift>, VersionError> {
        let mut drift = Vec::new();

        for (name, reported) in current {
            let Some(previous_version) = previous.get(name) else {
                continue;
            };

            let delta = report
                .contracts
                .get(name)
                .map(|r| r.delta)
                .unwrap_or_else(ContractVersionDelta::default);
            let expected = delta.applied_to(previous_version)?;

            if expected != *reported {
                warn!(
                    "{} reports version {} but its changes imply {} (was {})",
                    name, reported, expected, previous_version
                );
                drift.push(VersionDrift {
                    contract_name: name.clone(),
                    previous: *previous_version,
                    expected,
                    reported: *reported,
                });
            }
        }

        Ok(drift)
    }
}
