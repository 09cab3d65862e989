use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{hex, primitives::Bytes};

use crate::errors::ScriptError;

/// A compiled contract, as produced by the contract toolchain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifact {
    pub name: String,
    /// Creation bytecode, without constructor arguments
    pub bytecode: Bytes,
}

/// Read compiled artifacts from a directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load the artifact of the contract `name`
    ///
    /// Looks for `<root>/<name>.json` first, then for the hardhat layout
    /// `<root>/contracts/<name>.sol/<name>.json`.
    pub fn load(&self, name: &str) -> Result<ContractArtifact, ScriptError> {
        let file_path = self
            .candidates(name)
            .into_iter()
            .find(|path| path.exists())
            .ok_or_else(|| {
                ScriptError::Artifact(format!(
                    "no artifact for {} under {}",
                    name,
                    self.root.display()
                ))
            })?;

        let bytecode = read_bytecode(&file_path)?;
        if bytecode.is_empty() {
            return Err(ScriptError::Artifact(format!(
                "{} has no creation bytecode (abstract contract or interface?)",
                file_path.display()
            )));
        }

        Ok(ContractArtifact {
            name: name.to_string(),
            bytecode,
        })
    }

    fn candidates(&self, name: &str) -> [PathBuf; 2] {
        [
            self.root.join(format!("{name}.json")),
            self.root
                .join("contracts")
                .join(format!("{name}.sol"))
                .join(format!("{name}.json")),
        ]
    }
}

/// Extract the creation bytecode of an artifact file, either a plain hex
/// string or a `{ "object": "0x.." }` entry
fn read_bytecode(file_path: &Path) -> Result<Bytes, ScriptError> {
    let contents =
        fs::read_to_string(file_path).map_err(|e| ScriptError::Artifact(e.to_string()))?;
    let parsed = json::parse(&contents)
        .map_err(|e| ScriptError::Artifact(format!("{}: {}", file_path.display(), e)))?;

    let bytecode = parsed["bytecode"]
        .as_str()
        .or_else(|| parsed["bytecode"]["object"].as_str())
        .ok_or_else(|| {
            ScriptError::Artifact(format!("{} has no bytecode field", file_path.display()))
        })?;

    hex::decode(bytecode)
        .map(Bytes::from)
        .map_err(|e| ScriptError::Artifact(format!("{}: {}", file_path.display(), e)))
}
