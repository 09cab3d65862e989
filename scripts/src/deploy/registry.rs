use std::path::PathBuf;

use alloy::primitives::{keccak256, Address, Bytes, TxHash};
use tracing::{debug, info, warn};

use crate::{
    deploy::{address::predict_contract_address, artifacts::ArtifactStore},
    errors::ScriptError,
    output_writer::{DeploymentRecord, DeploymentsFile},
    tx::client::{ChainClient, TxRequest},
};

/// Options of a single named deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    /// ABI encoded constructor arguments
    pub args: Bytes,
    /// Blocks to wait for after the creation transaction
    pub wait_confirmations: u64,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            args: Bytes::new(),
            wait_confirmations: 1,
        }
    }
}

/// A deployed contract, bound to the account that will call it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub name: String,
    pub address: Address,
    pub signer: Address,
}

/// Resolves or creates named contract instances on one network
#[allow(async_fn_in_trait)]
pub trait DeploymentRegistry {
    /// Deploy `name`, or return the existing deployment when it is still live
    /// and was built from the same bytecode and arguments
    async fn deploy<C: ChainClient>(
        &mut self,
        client: &C,
        name: &str,
        options: DeployOptions,
    ) -> Result<DeploymentRecord, ScriptError>;

    /// Handle on an already deployed contract
    fn get_contract(&self, name: &str, signer: Address) -> Result<DeployedContract, ScriptError>;

    /// Forget the transactions of the previous bootstrap run
    fn begin_bootstrap(&mut self) -> Result<(), ScriptError>;

    /// Remember the transaction of a bootstrap step
    fn record_tx(&mut self, step: &str, hash: TxHash) -> Result<(), ScriptError>;
}

/// Registry backed by compiled artifacts and a per network deployments file
#[derive(Debug)]
pub struct FileRegistry {
    artifacts: ArtifactStore,
    deployments: DeploymentsFile,
}

impl FileRegistry {
    /// Open the deployments file of the connected network
    ///
    /// Fails if the file was written for another chain.
    pub async fn open<C: ChainClient>(
        client: &C,
        artifacts: ArtifactStore,
        deployments_path: impl Into<PathBuf>,
    ) -> Result<Self, ScriptError> {
        let chain_id = client.chain_id().await?;
        let mut deployments = DeploymentsFile::open(deployments_path)?;

        match deployments.chain_id() {
            Some(recorded) if recorded != chain_id => {
                return Err(ScriptError::IncompatibleDeployment(format!(
                    "{} holds deployments for chain {}, connected to chain {}",
                    deployments.path().display(),
                    recorded,
                    chain_id
                )))
            }
            Some(_) => {}
            None => deployments.set_chain_id(chain_id),
        }

        Ok(Self {
            artifacts,
            deployments,
        })
    }

    pub fn deployments(&self) -> &DeploymentsFile {
        &self.deployments
    }

    /// Check whether an existing record can be reused as is
    async fn reusable<C: ChainClient>(
        &self,
        client: &C,
        name: &str,
        bytecode_hash: &[u8],
        args: &Bytes,
    ) -> Result<Option<DeploymentRecord>, ScriptError> {
        let Some(existing) = self.deployments.read(name)? else {
            return Ok(None);
        };

        if existing.bytecode_hash.as_slice() != bytecode_hash || &existing.args != args {
            debug!("{} changed since its last deployment", name);
            return Ok(None);
        }

        // The node may have been reset since the record was written
        if client.code_at(existing.address).await?.is_empty() {
            debug!("No code at {:#x} anymore", existing.address);
            return Ok(None);
        }

        Ok(Some(existing))
    }
}

impl DeploymentRegistry for FileRegistry {
    async fn deploy<C: ChainClient>(
        &mut self,
        client: &C,
        name: &str,
        options: DeployOptions,
    ) -> Result<DeploymentRecord, ScriptError> {
        let artifact = self.artifacts.load(name)?;
        let bytecode_hash = keccak256(&artifact.bytecode);

        if let Some(existing) = self
            .reusable(client, name, bytecode_hash.as_slice(), &options.args)
            .await?
        {
            info!("reusing \"{}\" at {:#x}", name, existing.address);
            return Ok(existing);
        }

        // Predict the contract address
        let nonce = client.nonce().await?;
        let predicted = predict_contract_address(client.deployer(), nonce);
        debug!("Deploying {} at expected address {:#x}", name, predicted);

        // Creation code is the bytecode followed by the encoded arguments
        let mut creation_code = artifact.bytecode.to_vec();
        creation_code.extend_from_slice(&options.args);

        let outcome = client
            .submit(
                TxRequest::create(creation_code.into())
                    .with_confirmations(options.wait_confirmations),
            )
            .await
            .map_err(|e| match e {
                ScriptError::ContractInteraction(s) => {
                    ScriptError::ContractDeployment(format!("{}: {}", name, s))
                }
                other => other,
            })?;

        let address = outcome.contract_address.unwrap_or(predicted);
        if address != predicted {
            warn!(
                "{} deployed at {:#x} instead of the expected {:#x}",
                name, address, predicted
            );
        }
        info!(
            "deploying \"{}\" (tx: {:#x})...: deployed at {:#x} with {} gas",
            name, outcome.hash, address, outcome.gas_used
        );

        let record = DeploymentRecord {
            name: name.to_string(),
            address,
            tx_hash: outcome.hash,
            block_number: outcome.block_number,
            args: options.args,
            bytecode_hash,
        };
        self.deployments.write(&record);
        self.deployments.save()?;

        Ok(record)
    }

    fn get_contract(&self, name: &str, signer: Address) -> Result<DeployedContract, ScriptError> {
        let record = self
            .deployments
            .read(name)?
            .ok_or_else(|| ScriptError::MissingDeployment(name.to_string()))?;

        Ok(DeployedContract {
            name: record.name,
            address: record.address,
            signer,
        })
    }

    fn begin_bootstrap(&mut self) -> Result<(), ScriptError> {
        self.deployments.clear_bootstrap_txs();
        self.deployments.save()
    }

    fn record_tx(&mut self, step: &str, hash: TxHash) -> Result<(), ScriptError> {
        self.deployments.write_bootstrap_tx(step, hash);
        self.deployments.save()
    }
}
