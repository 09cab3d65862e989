//! Definitions of errors that can occur while deploying and bootstrapping the DEX

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Error when reading or writing the deployments file
    JsonOutputError(String),
    /// Error when creating the client
    ClientInitialization(String),
    /// Error when fetching the nonce to deploy a contract
    NonceFetching(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method or sending a transaction
    ContractInteraction(String),
    /// A transaction was mined but reverted
    TransactionReverted(String),
    /// Error loading a compiled contract artifact
    Artifact(String),
    /// No deployment recorded for the requested contract
    MissingDeployment(String),
    /// The deployments file does not match the connected network
    IncompatibleDeployment(String),
    /// Invalid bootstrap configuration value
    InvalidConfig(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::JsonOutputError(s) => write!(f, "error with deployments file: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error during client init: {}", s),
            ScriptError::NonceFetching(s) => {
                write!(f, "error during nonce fetching for client signing: {}", s)
            }
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::TransactionReverted(s) => write!(f, "transaction reverted: {}", s),
            ScriptError::Artifact(s) => write!(f, "error loading contract artifact: {}", s),
            ScriptError::MissingDeployment(s) => write!(f, "no deployment found for: {}", s),
            ScriptError::IncompatibleDeployment(s) => {
                write!(f, "incompatible deployment record: {}", s)
            }
            ScriptError::InvalidConfig(s) => write!(f, "invalid configuration: {}", s),
        }
    }
}

impl Error for ScriptError {}
