//! The per network deployments file: which contracts are live where, and the
//! transactions of the last bootstrap run

use std::{
    fmt::LowerHex,
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    hex,
    primitives::{Address, Bytes, B256},
};
use json::JsonValue;

use crate::errors::ScriptError;

/// A contract deployment, as remembered between runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRecord {
    pub name: String,
    pub address: Address,
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    /// ABI encoded constructor arguments
    pub args: Bytes,
    /// keccak256 of the creation bytecode, without the arguments
    pub bytecode_hash: B256,
}

/// In memory view of a deployments file
#[derive(Debug)]
pub struct DeploymentsFile {
    /// Where the file lives
    path: PathBuf,
    /// Parsed content, `{}` for a file not created yet
    parsed_json: JsonValue,
}

impl DeploymentsFile {
    /// Open the deployments file, an absent file is an empty one
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ScriptError> {
        let path = path.into();
        let parsed_json = if path.exists() {
            get_json_from_file(&path)?
        } else {
            JsonValue::new_object()
        };

        Ok(Self { path, parsed_json })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The chain the recorded deployments live on
    pub fn chain_id(&self) -> Option<u64> {
        self.parsed_json["chainId"].as_u64()
    }

    pub fn set_chain_id(&mut self, chain_id: u64) {
        self.parsed_json["chainId"] = chain_id.into();
    }

    /// Read a deployment record
    pub fn read(&self, name: &str) -> Result<Option<DeploymentRecord>, ScriptError> {
        let entry = &self.parsed_json["contracts"][name];
        if entry.is_null() {
            return Ok(None);
        }

        Ok(Some(DeploymentRecord {
            name: name.to_string(),
            address: parse_field(entry, "address")?,
            tx_hash: parse_field(entry, "txHash")?,
            block_number: entry["blockNumber"].as_u64(),
            args: parse_field(entry, "args")?,
            bytecode_hash: parse_field(entry, "bytecodeHash")?,
        }))
    }

    /// Writes the given record for a deployed contract
    pub fn write(&mut self, record: &DeploymentRecord) {
        let mut entry = JsonValue::new_object();
        entry["address"] = format!("{:#x}", record.address).into();
        entry["txHash"] = format!("{:#x}", record.tx_hash).into();
        entry["args"] = hex::encode_prefixed(&record.args).into();
        entry["bytecodeHash"] = format!("{:#x}", record.bytecode_hash).into();
        if let Some(block_number) = record.block_number {
            entry["blockNumber"] = block_number.into();
        }
        self.parsed_json["contracts"][record.name.as_str()] = entry;
    }

    /// Drop the bootstrap transactions of the previous run
    pub fn clear_bootstrap_txs(&mut self) {
        self.parsed_json["bootstrap"] = JsonValue::new_object();
    }

    /// Writes the transaction hash of a bootstrap step
    pub fn write_bootstrap_tx<T: LowerHex>(&mut self, step: &str, value: T) {
        self.parsed_json["bootstrap"][step] = JsonValue::String(format!("{value:#x}"));
    }

    /// Read back a hash written with [`Self::write_bootstrap_tx`]
    pub fn read_bootstrap_tx(&self, step: &str) -> Option<&str> {
        self.parsed_json["bootstrap"][step].as_str()
    }

    /// Write the updated json back to the file
    pub fn save(&self) -> Result<(), ScriptError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;
        }
        fs::write(&self.path, json::stringify_pretty(self.parsed_json.clone(), 4))
            .map_err(|e| ScriptError::JsonOutputError(e.to_string()))
    }
}

/// Parse a hex string field of a record
fn parse_field<T: std::str::FromStr>(entry: &JsonValue, key: &str) -> Result<T, ScriptError>
where
    T::Err: std::fmt::Display,
{
    let raw = entry[key]
        .as_str()
        .ok_or_else(|| ScriptError::JsonOutputError(format!("missing {key} in record")))?;
    raw.parse::<T>()
        .map_err(|e| ScriptError::JsonOutputError(format!("invalid {key} {raw:?}: {e}")))
}

/// Parses the JSON file at the given path
fn get_json_from_file(file_path: &Path) -> Result<JsonValue, ScriptError> {
    let file_contents =
        fs::read_to_string(file_path).map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    json::parse(&file_contents).map_err(|e| ScriptError::JsonOutputError(e.to_string()))
}
