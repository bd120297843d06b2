//! Version deltas derived from change categories
//!
//! Categories are ordered storage > major > minor > patch. The highest
//! category that changed is incremented, every lower one is reset, and
//! every higher one is left alone.

use super::contract_version::ContractVersion;
use super::error::VersionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Effect of a change category on one version component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delta {
    /// Component is left untouched
    #[default]
    None,
    /// Component is incremented by one
    Increment,
    /// Component is reset to zero
    Reset,
}

impl Delta {
    /// Apply this delta to a single version component
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_semver::version::Delta;
    ///
    /// assert_eq!(Delta::None.apply_to_number(7).unwrap(), 7);
    /// assert_eq!(Delta::Increment.apply_to_number(7).unwrap(), 8);
    /// assert_eq!(Delta::Reset.apply_to_number(7).unwrap(), 0);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Invariant`] if incrementing would overflow.
    pub fn apply_to_number(self, n: u64) -> Result<u64, VersionError> {
        match self {
            Delta::None => Ok(n),
            Delta::Reset => Ok(0),
            Delta::Increment => n.checked_add(1).ok_or_else(|| {
                VersionError::Invariant(format!("cannot increment version component {}", n))
            }),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Delta::None => "=",
            Delta::Increment => "+",
            Delta::Reset => "0",
        }
    }
}

/// One delta per version component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContractVersionDelta {
    /// Delta applied to the storage component
    pub storage: Delta,
    /// Delta applied to the major component
    pub major: Delta,
    /// Delta applied to the minor component
    pub minor: Delta,
    /// Delta applied to the patch component
    pub patch: Delta,
}

impl ContractVersionDelta {
    /// Derive the delta implied by which categories changed
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_semver::version::{ContractVersion, ContractVersionDelta, Delta};
    ///
    /// let delta = ContractVersionDelta::from_changes(false, false, true, true);
    /// assert_eq!(delta.minor, Delta::Increment);
    /// assert_eq!(delta.patch, Delta::Reset);
    ///
    /// let next = delta.applied_to(&ContractVersion::new(2, 7, 9, 1)).unwrap();
    /// assert_eq!(next, ContractVersion::new(2, 7, 10, 0));
    /// ```
    pub fn from_changes(
        storage_changed: bool,
        major_changed: bool,
        minor_changed: bool,
        patch_changed: bool,
    ) -> Self {
        let flags = [storage_changed, major_changed, minor_changed, patch_changed];
        let mut deltas = [Delta::None; 4];

        if let Some(trigger) = flags.iter().position(|changed| *changed) {
            deltas[trigger] = Delta::Increment;
            for delta in deltas.iter_mut().skip(trigger + 1) {
                *delta = Delta::Reset;
            }
        }

        let [storage, major, minor, patch] = deltas;
        Self {
            storage,
            major,
            minor,
            patch,
        }
    }

    /// Apply every component delta to `version`, returning the bumped version
    pub fn applied_to(&self, version: &ContractVersion) -> Result<ContractVersion, VersionError> {
        Ok(ContractVersion::new(
            self.storage.apply_to_number(version.storage)?,
            self.major.apply_to_number(version.major)?,
            self.minor.apply_to_number(version.minor)?,
            self.patch.apply_to_number(version.patch)?,
        ))
    }

    /// True when no component changes
    pub fn is_unchanged(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for ContractVersionDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "storage:{} major:{} minor:{} patch:{}",
            self.storage.symbol(),
            self.major.symbol(),
            self.minor.symbol(),
            self.patch.symbol()
        )
    }
}
