//! Four-component contract version
//!
//! A contract version is `storage.major.minor.patch`. The storage component
//! sits above major because a storage layout break cannot be fixed by
//! redeploying behind the same proxy.

use super::error::VersionError;
use revm::primitives::hex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Size of one ABI word in a version buffer
pub const WORD_SIZE: usize = 32;

/// Number of components in a contract version
pub const COMPONENT_COUNT: usize = 4;

/// Exact byte length of an ABI-encoded version buffer
pub const VERSION_BUFFER_LEN: usize = WORD_SIZE * COMPONENT_COUNT;

/// Version of a contract: `(storage, major, minor, patch)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContractVersion {
    /// Storage layout generation
    pub storage: u64,
    /// Interface-breaking generation
    pub major: u64,
    /// Additive generation
    pub minor: u64,
    /// Internal generation
    pub patch: u64,
}

impl ContractVersion {
    /// Version reported for contracts that do not expose a version function
    pub const INITIAL: ContractVersion = ContractVersion::new(1, 0, 0, 0);

    /// Create a version from its four components
    pub const fn new(storage: u64, major: u64, minor: u64, patch: u64) -> Self {
        Self {
            storage,
            major,
            minor,
            patch,
        }
    }

    /// Check whether `s` is a dotted four-component numeric version
    ///
    /// Each component must parse as a `u64`, so negative numbers and
    /// numbers past `u64::MAX` are rejected. A fractional number cannot
    /// appear since `.` separates components.
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_semver::version::ContractVersion;
    ///
    /// assert!(ContractVersion::is_valid("1.2.3.4"));
    /// assert!(!ContractVersion::is_valid("1.2.3"));
    /// assert!(!ContractVersion::is_valid("1.2.x.4"));
    /// assert!(!ContractVersion::is_valid("1.-2.3.4"));
    /// ```
    pub fn is_valid(s: &str) -> bool {
        let parts: Vec<&str> = s.split('.').collect();
        parts.len() == COMPONENT_COUNT && parts.iter().all(|p| p.parse::<u64>().is_ok())
    }

    /// Parse a dotted `storage.major.minor.patch` string
    pub fn from_string(s: &str) -> Result<Self, VersionError> {
        if !Self::is_valid(s) {
            return Err(VersionError::Format(format!(
                "'{}' is not a valid version: expected {} numeric components separated by '.'",
                s, COMPONENT_COUNT
            )));
        }

        let mut components = [0u64; COMPONENT_COUNT];
        for (slot, part) in components.iter_mut().zip(s.split('.')) {
            *slot = part
                .parse()
                .map_err(|e| VersionError::Format(format!("'{}' in '{}': {}", part, s, e)))?;
        }

        let [storage, major, minor, patch] = components;
        Ok(Self::new(storage, major, minor, patch))
    }

    /// Decode a 128-byte version buffer by reading each 32-byte word's hex
    /// text as a decimal component.
    ///
    /// This mirrors how deployed contracts have historically been read and
    /// only decodes words whose hex rendering contains decimal digits alone
    /// (`0x..09` decodes to 9, `0x..0a` is rejected). Use
    /// [`ContractVersion::from_abi_words`] to read the words as integers.
    pub fn from_buffer(buf: &[u8]) -> Result<Self, VersionError> {
        let words = Self::split_words(buf)?;
        let text = words
            .iter()
            .map(|word| hex::encode(word))
            .collect::<Vec<_>>()
            .join(".");
        Self::from_string(&text)
    }

    /// Decode a 128-byte version buffer as four big-endian unsigned words
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_semver::version::ContractVersion;
    ///
    /// let mut buf = [0u8; 128];
    /// buf[31] = 1;
    /// buf[63] = 10;
    /// let version = ContractVersion::from_abi_words(&buf).unwrap();
    /// assert_eq!(version, ContractVersion::new(1, 10, 0, 0));
    /// ```
    pub fn from_abi_words(buf: &[u8]) -> Result<Self, VersionError> {
        let words = Self::split_words(buf)?;

        let mut components = [0u64; COMPONENT_COUNT];
        for (index, (slot, word)) in components.iter_mut().zip(words).enumerate() {
            let (high, low) = word.split_at(WORD_SIZE - 8);
            if high.iter().any(|b| *b != 0) {
                return Err(VersionError::Format(format!(
                    "version word {} does not fit in 64 bits",
                    index
                )));
            }
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(low);
            *slot = u64::from_be_bytes(bytes);
        }

        let [storage, major, minor, patch] = components;
        Ok(Self::new(storage, major, minor, patch))
    }

    fn split_words(buf: &[u8]) -> Result<Vec<&[u8]>, VersionError> {
        if buf.len() != VERSION_BUFFER_LEN {
            return Err(VersionError::Format(format!(
                "version buffer must be {} bytes, got {}",
                VERSION_BUFFER_LEN,
                buf.len()
            )));
        }
        Ok(buf.chunks_exact(WORD_SIZE).collect())
    }

    /// Components in `(storage, major, minor, patch)` order
    pub fn components(&self) -> [u64; COMPONENT_COUNT] {
        [self.storage, self.major, self.minor, self.patch]
    }
}

impl fmt::Display for ContractVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.storage, self.major, self.minor, self.patch
        )
    }
}

impl FromStr for ContractVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl Serialize for ContractVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContractVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_string(&s).map_err(serde::de::Error::custom)
    }
}
