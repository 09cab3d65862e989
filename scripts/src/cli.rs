//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    commands::{deploy_contracts, show_status},
    config::{ether, BootstrapConfig},
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_DIR, DEFAULT_NETWORK, DEFAULT_RPC},
    deploy::artifacts::ArtifactStore,
    errors::ScriptError,
    tx::client::{create_rpc_provider, ChainClient},
};

/// Scripts for deploying the Balloons token & the DEX, and seeding its pool
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC)]
    pub rpc_url: String,

    /// Network name, selects the deployments file
    #[arg(short, long, default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Directory of the compiled contract artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Directory of the per network deployments files
    #[arg(long, default_value = DEFAULT_DEPLOYMENTS_DIR)]
    pub deployments_dir: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Build the client and run the command
    pub async fn run(self) -> Result<(), ScriptError> {
        let client = create_rpc_provider(&self.priv_key, &self.rpc_url).await?;
        let artifacts = ArtifactStore::new(self.artifacts_dir);
        let deployments_path = self.deployments_dir.join(format!("{}.json", self.network));

        self.command
            .run(&client, artifacts, deployments_path)
            .await
    }
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy Balloons and the DEX, fund the recipient and init the DEX
    Deploy(DeployArgs),
    /// Show the deployed addresses and the bootstrap balances
    Status(StatusArgs),
}

impl Command {
    /// Run the command
    pub async fn run<C: ChainClient>(
        self,
        client: &C,
        artifacts: ArtifactStore,
        deployments_path: PathBuf,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => {
                info!("Deploying contracts...");
                deploy_contracts(args, client, artifacts, deployments_path).await?;
                Ok(())
            }
            Command::Status(args) => {
                let recipient = match args.recipient {
                    Some(recipient) => parse_address(&recipient)?,
                    None => BootstrapConfig::default().recipient,
                };
                show_status(client, artifacts, deployments_path, recipient).await?;
                Ok(())
            }
        }
    }
}

/// Deploy & bootstrap
#[derive(Args, Debug, Default)]
pub struct DeployArgs {
    /// Only run if one of these tags matches (Balloons, DEX)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
    /// Address receiving the token credit and the native payment
    #[arg(long)]
    pub recipient: Option<String>,
    /// Balloons sent to the recipient, in whole tokens
    #[arg(long)]
    pub recipient_tokens: Option<String>,
    /// Native currency sent to the recipient, in whole units
    #[arg(long)]
    pub recipient_native: Option<String>,
    /// Balloons the DEX may pull from the deployer, in whole tokens
    #[arg(long)]
    pub dex_allowance: Option<String>,
    /// Balloons seeded into the pool, in whole tokens
    #[arg(long)]
    pub init_tokens: Option<String>,
    /// Native currency seeded into the pool, in whole units
    #[arg(long)]
    pub init_native: Option<String>,
    /// Gas ceiling of the init call
    #[arg(long)]
    pub init_gas_limit: Option<u128>,
    /// Confirmations to wait for after the DEX deployment
    #[arg(long)]
    pub dex_confirmations: Option<u64>,
    /// Skip init when the DEX pool already holds liquidity
    #[arg(long)]
    pub skip_initialized: bool,
}

impl DeployArgs {
    /// Apply the overrides on top of the default configuration
    pub fn to_config(&self) -> Result<BootstrapConfig, ScriptError> {
        let mut config = BootstrapConfig::default();

        if let Some(recipient) = &self.recipient {
            config.recipient = parse_address(recipient)?;
        }
        if let Some(amount) = &self.recipient_tokens {
            config.recipient_tokens = ether(amount)?;
        }
        if let Some(amount) = &self.recipient_native {
            config.recipient_native = ether(amount)?;
        }
        if let Some(amount) = &self.dex_allowance {
            config.dex_allowance = ether(amount)?;
        }
        if let Some(amount) = &self.init_tokens {
            config.init_tokens = ether(amount)?;
        }
        if let Some(amount) = &self.init_native {
            config.init_native = ether(amount)?;
        }
        if let Some(gas_limit) = self.init_gas_limit {
            config.init_gas_limit = gas_limit;
        }
        if let Some(confirmations) = self.dex_confirmations {
            config.dex_confirmations = confirmations;
        }
        config.skip_if_initialized = self.skip_initialized;

        config.validate()?;
        Ok(config)
    }
}

/// Inspect a previous deployment
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Recipient to report balances for
    #[arg(long)]
    pub recipient: Option<String>,
}

fn parse_address(raw: &str) -> Result<Address, ScriptError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|e| ScriptError::InvalidConfig(format!("invalid address {raw:?}: {e}")))
}
