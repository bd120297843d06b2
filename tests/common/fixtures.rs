//! Test fixture helpers for bytecode and build directories
//!
//! Runtime code is assembled by hand from a few opcodes so tests do not
//! depend on a Solidity compiler.

#![allow(dead_code)]

use contract_semver::categorize::{ApiChange, ChangeCategory};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// Runtime code that stores `words` in four 32-byte slots and returns them
///
/// `PUSH1 w PUSH1 offset MSTORE` per word, then `RETURN(0, 128)`.
pub fn version_returning(words: [u8; 4]) -> String {
    let mut code = String::from("0x");
    for (i, word) in words.iter().enumerate() {
        code.push_str(&format!("60{:02x}60{:02x}52", word, i * 32));
    }
    code.push_str("60806000f3");
    code
}

/// Runtime code that returns the version words only when called with
/// `selector`, and reverts on any other calldata
///
/// `selector := CALLDATALOAD(0) >> 224`; `JUMPI` past `REVERT(0, 0)` on a
/// match.
pub fn dispatching(selector: [u8; 4], words: [u8; 4]) -> String {
    // PUSH1 0 CALLDATALOAD PUSH1 0xe0 SHR PUSH4 <selector>
    let mut code = String::from("0x60003560e01c63");
    for byte in selector {
        code.push_str(&format!("{:02x}", byte));
    }
    // EQ PUSH1 0x14 JUMPI REVERT(0, 0) JUMPDEST at 0x14
    code.push_str("1460145760006000fd5b");
    code.push_str(&version_returning(words)[2..]);
    code
}

/// Runtime code that reverts with empty data, like a contract without a
/// version function
pub fn reverting() -> String {
    "0x60006000fd".to_string()
}

/// Runtime code that writes storage before returning a version
pub fn storage_writing() -> String {
    format!("0x6001600055{}", &version_returning([9, 9, 9, 9])[2..])
}

/// Runtime code returning the version words behind an unlinked library call
///
/// The placeholder sits in dead code after `RETURN`, where a real library
/// address would be pushed.
pub fn with_link_placeholder(words: [u8; 4]) -> String {
    format!(
        "{}73__MathLib_______________________________",
        version_returning(words)
    )
}

/// Write one artifact JSON file per `(name, bytecode)` into a new build dir
///
/// # Returns
///
/// The TempDir holding the artifacts; it must be kept alive
pub fn create_build_dir<S: AsRef<str>>(contracts: &[(&str, S)]) -> anyhow::Result<TempDir> {
    let temp_dir = TempDir::new()?;
    for (name, bytecode) in contracts {
        write_artifact(temp_dir.path(), name, bytecode.as_ref())?;
    }
    Ok(temp_dir)
}

/// Write a build artifact in the shape emitted by contract build tooling
pub fn write_artifact(dir: &Path, name: &str, bytecode: &str) -> anyhow::Result<()> {
    let artifact = json!({
        "contractName": name,
        "abi": [],
        "bytecode": bytecode,
        "deployedBytecode": bytecode,
        "sourcePath": format!("contracts/{}.sol", name),
    });
    fs::write(
        dir.join(format!("{}.json", name)),
        serde_json::to_string_pretty(&artifact)?,
    )?;
    Ok(())
}

/// Categorization policy used across integration tests
///
/// Removals break callers, additions extend the interface, everything else
/// is internal.
pub fn policy(change: &ApiChange) -> ChangeCategory {
    match change.kind.as_str() {
        "function-removed" | "event-removed" => ChangeCategory::Major,
        "function-added" | "event-added" => ChangeCategory::Minor,
        _ => ChangeCategory::Patch,
    }
}
