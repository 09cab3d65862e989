use alloy::{
    network::{Ethereum, EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, TxHash, U256},
    providers::{
        fillers::{ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller},
        Identity, Provider, ProviderBuilder, ReqwestProvider, WalletProvider,
    },
    rpc::types::eth::TransactionRequest,
    signers::local::PrivateKeySigner,
    sol_types::SolCall,
};
use reqwest::{Client, Url};
use tracing::{debug, info};

use crate::errors::ScriptError;

/// Re-export from alloy recommend filter
type RecommendFiller =
    JoinFill<JoinFill<JoinFill<Identity, GasFiller>, NonceFiller>, ChainIdFiller>;

/// An alloy provider that uses a local private key wallet to sign transactions
/// & interfaces with the RPC endpoint over HTTP
pub type RpcProvider = FillProvider<
    JoinFill<RecommendFiller, WalletFiller<EthereumWallet>>,
    ReqwestProvider,
    alloy::transports::http::Http<Client>,
    Ethereum,
>;

/// A transaction to submit from the deployer account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRequest {
    /// Target of the call, `None` for a contract creation
    pub to: Option<Address>,
    /// Calldata, or the creation code for a deployment
    pub input: Bytes,
    /// Native currency attached to the transaction
    pub value: U256,
    /// Explicit gas ceiling, estimated by the node otherwise
    pub gas_limit: Option<u128>,
    /// Blocks to wait for before the receipt is returned
    pub confirmations: u64,
}

impl TxRequest {
    /// Call a contract method
    pub fn call<C: SolCall>(to: Address, call: &C) -> Self {
        Self {
            to: Some(to),
            input: call.abi_encode().into(),
            value: U256::ZERO,
            gas_limit: None,
            confirmations: 1,
        }
    }

    /// Plain native currency transfer
    pub fn transfer(to: Address, value: U256) -> Self {
        Self {
            to: Some(to),
            input: Bytes::new(),
            value,
            gas_limit: None,
            confirmations: 1,
        }
    }

    /// Contract creation with the given creation code
    pub fn create(code: Bytes) -> Self {
        Self {
            to: None,
            input: code,
            value: U256::ZERO,
            gas_limit: None,
            confirmations: 1,
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u128) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }
}

/// What we keep from a mined transaction receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub hash: TxHash,
    pub from: Address,
    pub block_number: Option<u64>,
    /// Set for contract creations
    pub contract_address: Option<Address>,
    pub gas_used: u128,
    pub effective_gas_price: u128,
}

/// The chain operations needed by the registry and the bootstrap sequence,
/// all bound to a single deployer account
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// Address signing every submitted transaction
    fn deployer(&self) -> Address;

    async fn chain_id(&self) -> Result<u64, ScriptError>;

    /// Next nonce of the deployer
    async fn nonce(&self) -> Result<u64, ScriptError>;

    async fn code_at(&self, address: Address) -> Result<Bytes, ScriptError>;

    async fn native_balance(&self, address: Address) -> Result<U256, ScriptError>;

    /// Perform a read only call, returning the raw return data
    async fn read_call(&self, to: Address, input: Bytes) -> Result<Bytes, ScriptError>;

    /// Sign, send and wait for the transaction, failing if it reverted
    async fn submit(&self, request: TxRequest) -> Result<TxOutcome, ScriptError>;
}

/// Build our RPC client, signing with the given private key
pub async fn create_rpc_provider(priv_key: &str, rpc_url: &str) -> Result<RpcProvider, ScriptError> {
    // Create our signer
    let signer = priv_key
        .trim()
        .parse::<PrivateKeySigner>()
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let wallet = EthereumWallet::from(signer);

    let url = rpc_url
        .parse::<Url>()
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    // Create our provider with the rpc client + signer
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(url);

    // Fetch chain id
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    info!("Build client on chain ID: {}", chain_id);

    Ok(provider)
}

impl ChainClient for RpcProvider {
    fn deployer(&self) -> Address {
        self.default_signer_address()
    }

    async fn chain_id(&self) -> Result<u64, ScriptError> {
        self.get_chain_id()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))
    }

    async fn nonce(&self) -> Result<u64, ScriptError> {
        self.get_transaction_count(self.deployer())
            .await
            .map_err(|e| ScriptError::NonceFetching(e.to_string()))
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, ScriptError> {
        self.get_code_at(address)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn native_balance(&self, address: Address) -> Result<U256, ScriptError> {
        self.get_balance(address)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn read_call(&self, to: Address, input: Bytes) -> Result<Bytes, ScriptError> {
        let tx_request = TransactionRequest::default().to(to).with_input(input);
        self.call(&tx_request)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn submit(&self, request: TxRequest) -> Result<TxOutcome, ScriptError> {
        // Build the tx
        let mut tx_request = match request.to {
            Some(to) => TransactionRequest::default().to(to).with_input(request.input),
            None => TransactionRequest::default().with_deploy_code(request.input),
        }
        .with_value(request.value);
        if let Some(gas_limit) = request.gas_limit {
            tx_request = tx_request.with_gas_limit(gas_limit);
        }

        // Send it
        let pending_tx = self
            .send_transaction(tx_request)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        debug!("Pending transaction... {}", pending_tx.tx_hash());

        // Wait for the transaction to be included, and for the extra blocks if asked
        let receipt = pending_tx
            .with_required_confirmations(request.confirmations)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::TransactionReverted(format!(
                "{:#x}",
                receipt.transaction_hash
            )));
        }

        Ok(TxOutcome {
            hash: receipt.transaction_hash,
            from: receipt.from,
            block_number: receipt.block_number,
            contract_address: receipt.contract_address,
            gas_used: receipt.gas_used,
            effective_gas_price: receipt.effective_gas_price,
        })
    }
}
