//! The bootstrap sequence: deploy Balloons and the DEX, pre-fund the
//! recipient, then seed the DEX pool.
//!
//! Every step waits for its transaction to be mined before the next one is
//! sent. The first failure aborts the sequence, nothing is retried or rolled
//! back.

use alloy::{
    primitives::{Address, TxHash, U256},
    sol_types::SolValue,
};
use tracing::{debug, info, warn};

use crate::{
    config::BootstrapConfig,
    constants::{
        BALLOONS, BOOTSTRAP_TAGS, DEX, LOCAL_CHAIN_ID, STEP_APPROVE, STEP_INIT, STEP_NATIVE,
        STEP_TRANSFER,
    },
    deploy::registry::{DeployOptions, DeploymentRegistry},
    errors::ScriptError,
    tx::{
        client::ChainClient,
        reader::get_total_liquidity,
        sender::{send_approve, send_dex_init, send_native, send_token_transfer},
    },
};

/// What a bootstrap run did on chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub chain_id: u64,
    pub deployer: Address,
    pub balloons: Address,
    pub dex: Address,
    pub transfer_tx: TxHash,
    pub native_tx: TxHash,
    pub approve_tx: TxHash,
    /// `None` when init was skipped on an already seeded pool
    pub init_tx: Option<TxHash>,
}

/// Whether a run filtered on `tags` includes the bootstrap sequence
pub fn matches_tags(tags: &[String]) -> bool {
    tags.is_empty()
        || tags
            .iter()
            .any(|tag| BOOTSTRAP_TAGS.contains(&tag.as_str()))
}

/// Runs the bootstrap sequence from the deployer account of `client`
pub struct BootstrapDeployer<'a, C, R> {
    client: &'a C,
    registry: &'a mut R,
    config: BootstrapConfig,
}

impl<'a, C: ChainClient, R: DeploymentRegistry> BootstrapDeployer<'a, C, R> {
    pub fn new(client: &'a C, registry: &'a mut R, config: BootstrapConfig) -> Self {
        Self {
            client,
            registry,
            config,
        }
    }

    /// Run the whole sequence
    pub async fn run(self) -> Result<BootstrapReport, ScriptError> {
        let Self {
            client,
            registry,
            config,
        } = self;
        config.validate()?;

        let deployer = client.deployer();
        let chain_id = client.chain_id().await?;
        info!("Bootstrapping from {:#x} on chain {}", deployer, chain_id);

        // Hashes from a previous run must not mix with this one
        registry.begin_bootstrap()?;

        // Balloons, no constructor arguments
        registry
            .deploy(client, BALLOONS, DeployOptions::default())
            .await?;
        let balloons = registry.get_contract(BALLOONS, deployer)?;

        // DEX, bound to Balloons
        let dex_options = DeployOptions {
            args: balloons.address.abi_encode().into(),
            wait_confirmations: confirmations_for(chain_id, config.dex_confirmations),
        };
        registry.deploy(client, DEX, dex_options).await?;
        let dex = registry.get_contract(DEX, deployer)?;

        // Pre-fund the recipient
        let transfer = send_token_transfer(
            client,
            balloons.address,
            config.recipient,
            config.recipient_tokens,
        )
        .await?;
        registry.record_tx(STEP_TRANSFER, transfer.hash)?;

        let native = send_native(client, config.recipient, config.recipient_native).await?;
        registry.record_tx(STEP_NATIVE, native.hash)?;

        info!(
            "Approving DEX ({:#x}) to take Balloons from main account...",
            dex.address
        );
        let approve =
            send_approve(client, balloons.address, dex.address, config.dex_allowance).await?;
        registry.record_tx(STEP_APPROVE, approve.hash)?;

        if config.skip_if_initialized {
            let liquidity = get_total_liquidity(client, dex.address).await?;
            if liquidity > U256::ZERO {
                warn!(
                    "DEX already holds {} liquidity, skipping init",
                    liquidity
                );
                return Ok(BootstrapReport {
                    chain_id,
                    deployer,
                    balloons: balloons.address,
                    dex: dex.address,
                    transfer_tx: transfer.hash,
                    native_tx: native.hash,
                    approve_tx: approve.hash,
                    init_tx: None,
                });
            }
        }

        info!(
            "INIT exchange... {:#x} {}",
            native.from, native.effective_gas_price
        );
        let init = send_dex_init(
            client,
            dex.address,
            config.init_tokens,
            config.init_native,
            config.init_gas_limit,
        )
        .await?;
        registry.record_tx(STEP_INIT, init.hash)?;

        Ok(BootstrapReport {
            chain_id,
            deployer,
            balloons: balloons.address,
            dex: dex.address,
            transfer_tx: transfer.hash,
            native_tx: native.hash,
            approve_tx: approve.hash,
            init_tx: Some(init.hash),
        })
    }
}

/// The local dev node only mines on new transactions, more than one
/// confirmation would never arrive there
fn confirmations_for(chain_id: u64, wanted: u64) -> u64 {
    if chain_id == LOCAL_CHAIN_ID && wanted > 1 {
        debug!("Local chain, waiting for 1 confirmation instead of {}", wanted);
        return 1;
    }
    wanted
}
