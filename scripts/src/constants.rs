//! Constants used in the deploy scripts

use alloy::primitives::{address, Address};

/// Default RPC endpoint, a local development node
pub const DEFAULT_RPC: &str = "http://127.0.0.1:8545";

/// Chain id of the local development node
pub const LOCAL_CHAIN_ID: u64 = 31337;

/// Default network name, used to pick the deployments file
pub const DEFAULT_NETWORK: &str = "localhost";

/// Default directory holding the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Default directory holding the per network deployments files
pub const DEFAULT_DEPLOYMENTS_DIR: &str = "deployments";

/// Name of the token contract artifact
pub const BALLOONS: &str = "Balloons";

/// Name of the exchange contract artifact
pub const DEX: &str = "DEX";

/// Tags under which the bootstrap sequence runs
pub const BOOTSTRAP_TAGS: [&str; 2] = [BALLOONS, DEX];

/// Bootstrap steps whose transaction is recorded, in execution order
pub const STEP_TRANSFER: &str = "transfer";
pub const STEP_NATIVE: &str = "native";
pub const STEP_APPROVE: &str = "approve";
pub const STEP_INIT: &str = "init";
pub const BOOTSTRAP_STEPS: [&str; 4] = [STEP_TRANSFER, STEP_NATIVE, STEP_APPROVE, STEP_INIT];

/// Front-end address pre-funded on deploy
pub const DEFAULT_RECIPIENT: Address = address!("059d1a9217c879B3e1cF1f9ee6e69fc6886b3bb2");

/// Base units in one whole Balloon or native unit (18 decimals)
pub const UNIT: u128 = 1_000_000_000_000_000_000;

/// Balloons sent to the recipient, 10 whole tokens
pub const DEFAULT_RECIPIENT_TOKENS: u128 = 10 * UNIT;

/// Native currency sent to the recipient, 0.1 unit
pub const DEFAULT_RECIPIENT_NATIVE: u128 = UNIT / 10;

/// Balloons the DEX may pull from the deployer, 100 whole tokens
pub const DEFAULT_DEX_ALLOWANCE: u128 = 100 * UNIT;

/// Balloons seeded into the DEX pool, 0.5 token
pub const DEFAULT_INIT_TOKENS: u128 = UNIT / 2;

/// Native currency seeded into the DEX pool, 0.5 unit
pub const DEFAULT_INIT_NATIVE: u128 = UNIT / 2;

/// Gas ceiling of the DEX init call
pub const DEFAULT_INIT_GAS_LIMIT: u128 = 200_000;

/// Confirmations awaited after the DEX deployment
pub const DEFAULT_DEX_CONFIRMATIONS: u64 = 5;
