use alloy::{
    primitives::{Address, U256},
    sol_types::SolCall,
};

use crate::{
    errors::ScriptError,
    tx::{
        abi::{
            IBalloons::{allowanceCall, balanceOfCall},
            IDex::totalLiquidityCall,
        },
        client::ChainClient,
    },
};

/// Perform a view call and decode its return values
async fn read<C: ChainClient, T: SolCall>(
    client: &C,
    contract: Address,
    call: T,
) -> Result<T::Return, ScriptError> {
    let output = client
        .read_call(contract, call.abi_encode().into())
        .await?;
    T::abi_decode_returns(&output, true)
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
}

/// Get the Balloons balance of an account
pub async fn get_token_balance<C: ChainClient>(
    client: &C,
    token: Address,
    account: Address,
) -> Result<U256, ScriptError> {
    Ok(read(client, token, balanceOfCall { account }).await?._0)
}

/// Get how many Balloons `spender` may still pull from `owner`
pub async fn get_allowance<C: ChainClient>(
    client: &C,
    token: Address,
    owner: Address,
    spender: Address,
) -> Result<U256, ScriptError> {
    Ok(read(client, token, allowanceCall { owner, spender }).await?._0)
}

/// Get the liquidity currently held by the DEX pool
pub async fn get_total_liquidity<C: ChainClient>(
    client: &C,
    dex: Address,
) -> Result<U256, ScriptError> {
    Ok(read(client, dex, totalLiquidityCall {}).await?._0)
}
