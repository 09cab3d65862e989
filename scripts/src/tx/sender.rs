use alloy::primitives::{Address, U256};
use tracing::info;

use crate::{
    errors::ScriptError,
    tx::{
        abi::{
            IBalloons::{approveCall, transferCall},
            IDex::initCall,
        },
        client::{ChainClient, TxOutcome, TxRequest},
    },
};

/// Transfer some Balloons from the deployer
pub async fn send_token_transfer<C: ChainClient>(
    client: &C,
    token: Address,
    to: Address,
    amount: U256,
) -> Result<TxOutcome, ScriptError> {
    let outcome = client
        .submit(TxRequest::call(token, &transferCall { to, amount }))
        .await?;
    log_done("Token transfer", &outcome);
    Ok(outcome)
}

/// Send native currency from the deployer
pub async fn send_native<C: ChainClient>(
    client: &C,
    to: Address,
    value: U256,
) -> Result<TxOutcome, ScriptError> {
    let outcome = client.submit(TxRequest::transfer(to, value)).await?;
    log_done("Native transfer", &outcome);
    Ok(outcome)
}

/// Allow `spender` to pull Balloons from the deployer
pub async fn send_approve<C: ChainClient>(
    client: &C,
    token: Address,
    spender: Address,
    amount: U256,
) -> Result<TxOutcome, ScriptError> {
    let outcome = client
        .submit(TxRequest::call(token, &approveCall { spender, amount }))
        .await?;
    log_done("Approve", &outcome);
    Ok(outcome)
}

/// Seed the DEX pool, the allowance must already cover `tokens`
pub async fn send_dex_init<C: ChainClient>(
    client: &C,
    dex: Address,
    tokens: U256,
    value: U256,
    gas_limit: u128,
) -> Result<TxOutcome, ScriptError> {
    let request = TxRequest::call(dex, &initCall { tokens })
        .with_value(value)
        .with_gas_limit(gas_limit);
    let outcome = client.submit(request).await?;
    log_done("Init", &outcome);
    Ok(outcome)
}

fn log_done(what: &str, outcome: &TxOutcome) {
    match outcome.block_number {
        Some(block) => info!("{} tx {:#x} done on block: {}", what, outcome.hash, block),
        None => info!("{} tx {:#x} done", what, outcome.hash),
    }
}
