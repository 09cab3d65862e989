use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use tracing::info;

use crate::{
    bootstrap::{matches_tags, BootstrapDeployer, BootstrapReport},
    cli::DeployArgs,
    constants::{BALLOONS, BOOTSTRAP_STEPS, DEX},
    deploy::{
        artifacts::ArtifactStore,
        registry::{DeploymentRegistry, FileRegistry},
    },
    errors::ScriptError,
    tx::{
        client::ChainClient,
        reader::{get_allowance, get_token_balance, get_total_liquidity},
    },
};

/// Deploy Balloons & the DEX, then run the bootstrap transactions
///
/// Returns `None` when the requested tags do not include this sequence.
pub async fn deploy_contracts<C: ChainClient>(
    args: DeployArgs,
    client: &C,
    artifacts: ArtifactStore,
    deployments_path: PathBuf,
) -> Result<Option<BootstrapReport>, ScriptError> {
    if !matches_tags(&args.tags) {
        info!("No matching tags in {:?}, nothing to deploy", args.tags);
        return Ok(None);
    }
    let config = args.to_config()?;

    let mut registry = FileRegistry::open(client, artifacts, deployments_path).await?;
    let report = BootstrapDeployer::new(client, &mut registry, config)
        .run()
        .await?;

    info!("Balloons deployed at: {:#x}", report.balloons);
    info!("DEX deployed at: {:#x}", report.dex);
    match report.init_tx {
        Some(init_tx) => info!("DEX initialized in tx: {:#x}", init_tx),
        None => info!("DEX init skipped"),
    }

    Ok(Some(report))
}

/// Live state of a bootstrapped network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub balloons: Address,
    pub dex: Address,
    pub recipient_tokens: U256,
    pub recipient_native: U256,
    /// Balloons the DEX may still pull from the deployer
    pub dex_allowance: U256,
    pub dex_liquidity: U256,
    /// Recorded hash of each bootstrap step of the last run, in step order
    pub bootstrap_txs: Vec<(String, Option<String>)>,
}

/// Read back the deployment and the balances the bootstrap touched
pub async fn show_status<C: ChainClient>(
    client: &C,
    artifacts: ArtifactStore,
    deployments_path: PathBuf,
    recipient: Address,
) -> Result<StatusReport, ScriptError> {
    let registry = FileRegistry::open(client, artifacts, deployments_path).await?;
    let deployer = client.deployer();
    let balloons = registry.get_contract(BALLOONS, deployer)?;
    let dex = registry.get_contract(DEX, deployer)?;

    let status = StatusReport {
        balloons: balloons.address,
        dex: dex.address,
        recipient_tokens: get_token_balance(client, balloons.address, recipient).await?,
        recipient_native: client.native_balance(recipient).await?,
        dex_allowance: get_allowance(client, balloons.address, dex.signer, dex.address).await?,
        dex_liquidity: get_total_liquidity(client, dex.address).await?,
        bootstrap_txs: BOOTSTRAP_STEPS
            .iter()
            .map(|step| {
                let hash = registry.deployments().read_bootstrap_tx(step);
                (step.to_string(), hash.map(str::to_string))
            })
            .collect(),
    };

    info!("Balloons: {:#x}", status.balloons);
    info!("DEX: {:#x}", status.dex);
    info!(
        "Recipient {:#x}: {} Balloons, {} native",
        recipient, status.recipient_tokens, status.recipient_native
    );
    info!(
        "DEX allowance from {:#x}: {}, liquidity: {}",
        dex.signer, status.dex_allowance, status.dex_liquidity
    );
    for (step, hash) in &status.bootstrap_txs {
        match hash {
            Some(hash) => info!("Bootstrap {}: {}", step, hash),
            None => info!("Bootstrap {}: not recorded", step),
        }
    }

    Ok(status)
}
