//! Compiled contract artifacts

use super::error::ArtifactError;
use crate::infra::{FileSystem, RealFileSystem};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A compiled contract as written by the build tooling
///
/// Only the fields needed for version discovery are kept; everything else
/// in the artifact JSON is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Contract name
    pub contract_name: String,
    /// Runtime bytecode as hex, possibly containing link placeholders
    #[serde(default)]
    pub deployed_bytecode: String,
}

impl Artifact {
    /// Create an artifact from a name and runtime bytecode
    pub fn new(contract_name: impl Into<String>, deployed_bytecode: impl Into<String>) -> Self {
        Self {
            contract_name: contract_name.into(),
            deployed_bytecode: deployed_bytecode.into(),
        }
    }
}

/// Collection of compiled artifacts for one build
#[derive(Debug, Clone, Default)]
pub struct BuildArtifacts {
    artifacts: Vec<Artifact>,
}

impl BuildArtifacts {
    /// Wrap artifacts already in memory
    pub fn new(artifacts: Vec<Artifact>) -> Self {
        Self { artifacts }
    }

    /// Load every `*.json` artifact in a build directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use contract_semver::extractor::BuildArtifacts;
    /// use std::path::Path;
    ///
    /// let artifacts = BuildArtifacts::from_dir(Path::new("build/contracts"))?;
    /// for artifact in artifacts.list_artifacts() {
    ///     println!("{}", artifact.contract_name);
    /// }
    /// # Ok::<(), contract_semver::extractor::ArtifactError>(())
    /// ```
    pub fn from_dir(dir: &Path) -> Result<Self, ArtifactError> {
        Self::from_dir_with_fs(dir, &RealFileSystem)
    }

    /// Load artifacts with a custom filesystem implementation
    pub fn from_dir_with_fs<FS: FileSystem>(dir: &Path, fs: &FS) -> Result<Self, ArtifactError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| ArtifactError::Io { path, source }
        };

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs.read_dir(dir).map_err(io_err(dir))? {
            let path = entry.map_err(io_err(dir))?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut artifacts = Vec::with_capacity(paths.len());
        for path in paths {
            let contents = fs.read_to_string(&path).map_err(io_err(&path))?;
            let value: Value = serde_json::from_str(&contents).map_err(|source| {
                ArtifactError::Parse {
                    path: path.clone(),
                    source,
                }
            })?;

            if value.get("contractName").and_then(Value::as_str).is_none() {
                debug!("Skipping {}: no contractName", path.display());
                continue;
            }

            let artifact: Artifact =
                serde_json::from_value(value).map_err(|source| ArtifactError::Parse {
                    path: path.clone(),
                    source,
                })?;
            artifacts.push(artifact);
        }

        debug!(
            "Loaded {} artifact(s) from {}",
            artifacts.len(),
            dir.display()
        );
        Ok(Self { artifacts })
    }

    /// All artifacts in this build
    pub fn list_artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Look up an artifact by contract name
    pub fn get(&self, contract_name: &str) -> Option<&Artifact> {
        self.artifacts
            .iter()
            .find(|a| a.contract_name == contract_name)
    }
}
