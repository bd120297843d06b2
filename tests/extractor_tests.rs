//! Integration tests for on-chain version extraction

mod common;

use common::fixtures::*;
use contract_semver::config::ExtractorConfig;
use contract_semver::extractor::{
    function_selector, ArtifactError, BuildArtifacts, ContractVersions, ExtractionError,
    VersionSource,
};
use contract_semver::version::ContractVersion;
use std::fs;

#[test]
fn test_decodes_version_words_1_2_3_4() {
    common::init_logger();
    let version = ContractVersions::get_contract_version(&version_returning([1, 2, 3, 4]));
    assert_eq!(version, ContractVersion::new(1, 2, 3, 4));
}

#[test]
fn test_reverting_contract_falls_back_to_initial_version() {
    assert_eq!(
        ContractVersions::get_contract_version(&reverting()),
        ContractVersion::new(1, 0, 0, 0)
    );
}

#[test]
fn test_empty_output_falls_back_to_initial_version() {
    // STOP: succeeds with zero bytes of output
    assert_eq!(
        ContractVersions::get_contract_version("0x00"),
        ContractVersion::INITIAL
    );
    assert!(matches!(
        ContractVersions::extract("0x00", &ExtractorConfig::default()),
        Err(ExtractionError::UnexpectedLength { actual: 0, .. })
    ));
}

#[test]
fn test_state_changing_version_function_is_rejected() {
    let config = ExtractorConfig::default();
    assert!(ContractVersions::extract(&storage_writing(), &config).is_err());
    assert_eq!(
        ContractVersions::get_contract_version(&storage_writing()),
        ContractVersion::INITIAL
    );
}

#[test]
fn test_link_placeholders_are_resolved_before_execution() {
    let code = with_link_placeholder([3, 0, 1, 2]);
    assert_eq!(
        ContractVersions::get_contract_version(&code),
        ContractVersion::new(3, 0, 1, 2)
    );
}

#[test]
fn test_version_function_selected_by_calldata() {
    let selector = function_selector("getVersionNumber()");
    let code = dispatching(selector, [1, 2, 3, 4]);

    let config = ExtractorConfig::default();
    let resolved = ContractVersions::resolve(&code, &config);
    assert_eq!(resolved.version, ContractVersion::new(1, 2, 3, 4));
    assert_eq!(resolved.source, VersionSource::Extracted);

    // Any other function falls through to the revert branch
    let other = ExtractorConfig {
        selector_signature: "version()".to_string(),
        ..ExtractorConfig::default()
    };
    assert_eq!(
        ContractVersions::extract(&code, &other),
        Err(ExtractionError::Reverted(0))
    );
    assert_eq!(
        ContractVersions::resolve(&code, &other).version,
        ContractVersion::INITIAL
    );
}

#[test]
fn test_runaway_code_is_bounded_by_gas() {
    let config = ExtractorConfig {
        gas_limit: 100_000,
        ..ExtractorConfig::default()
    };
    // JUMPDEST PUSH1 0 JUMP
    let resolved = ContractVersions::resolve("0x5b600056", &config);
    assert_eq!(resolved.source, VersionSource::Defaulted);
}

#[test]
fn test_from_dir_extracts_every_artifact() {
    common::init_logger();
    let dir = create_build_dir(&[
        ("Token", version_returning([1, 2, 0, 0])),
        ("Vault", version_returning([2, 0, 0, 5])),
        ("Legacy", reverting()),
    ])
    .unwrap();
    // Non-artifact files are ignored
    fs::write(dir.path().join("README.md"), "build output").unwrap();

    let artifacts = BuildArtifacts::from_dir(dir.path()).unwrap();
    assert_eq!(artifacts.list_artifacts().len(), 3);

    let config = ExtractorConfig::default();
    let detailed = ContractVersions::from_artifacts_detailed(&artifacts, &config);
    assert_eq!(detailed["Token"].version, ContractVersion::new(1, 2, 0, 0));
    assert_eq!(detailed["Vault"].version, ContractVersion::new(2, 0, 0, 5));
    assert_eq!(detailed["Legacy"].version, ContractVersion::INITIAL);
    assert_eq!(detailed["Legacy"].source, VersionSource::Defaulted);
}

#[test]
fn test_from_dir_reports_malformed_artifact() {
    let dir = create_build_dir(&[("Token", version_returning([1, 0, 0, 0]))]).unwrap();
    fs::write(dir.path().join("Broken.json"), "{ not json").unwrap();

    let err = BuildArtifacts::from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, ArtifactError::Parse { .. }));
}

#[test]
fn test_from_dir_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = BuildArtifacts::from_dir(&dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, ArtifactError::Io { .. }));
}
