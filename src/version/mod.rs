//! Version algebra for upgradeable contracts
//!
//! Provides:
//! - [`ContractVersion`], the `storage.major.minor.patch` tuple
//! - [`Delta`] and [`ContractVersionDelta`], the cascading bump rules

pub mod contract_version;
pub mod delta;
pub mod error;

pub use contract_version::{ContractVersion, VERSION_BUFFER_LEN};
pub use delta::{ContractVersionDelta, Delta};
pub use error::VersionError;
