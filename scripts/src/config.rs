//! Bootstrap configuration: the recipient, seed amounts and wait policy

use alloy::primitives::{utils::parse_ether, Address, U256};

use crate::{
    constants::{
        DEFAULT_DEX_ALLOWANCE, DEFAULT_DEX_CONFIRMATIONS, DEFAULT_INIT_GAS_LIMIT,
        DEFAULT_INIT_NATIVE, DEFAULT_INIT_TOKENS, DEFAULT_RECIPIENT, DEFAULT_RECIPIENT_NATIVE,
        DEFAULT_RECIPIENT_TOKENS,
    },
    errors::ScriptError,
};

/// Values driving the bootstrap sequence, all amounts in base units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// Address receiving the token credit and the native payment
    pub recipient: Address,
    /// Balloons transferred to the recipient
    pub recipient_tokens: U256,
    /// Native currency sent to the recipient
    pub recipient_native: U256,
    /// Allowance granted to the DEX
    pub dex_allowance: U256,
    /// Balloons passed to `init`
    pub init_tokens: U256,
    /// Native currency attached to `init`
    pub init_native: U256,
    /// Gas ceiling of the `init` call
    pub init_gas_limit: u128,
    /// Confirmations awaited after deploying the DEX
    pub dex_confirmations: u64,
    /// Skip `init` when the pool already holds liquidity
    pub skip_if_initialized: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT,
            recipient_tokens: U256::from(DEFAULT_RECIPIENT_TOKENS),
            recipient_native: U256::from(DEFAULT_RECIPIENT_NATIVE),
            dex_allowance: U256::from(DEFAULT_DEX_ALLOWANCE),
            init_tokens: U256::from(DEFAULT_INIT_TOKENS),
            init_native: U256::from(DEFAULT_INIT_NATIVE),
            init_gas_limit: DEFAULT_INIT_GAS_LIMIT,
            dex_confirmations: DEFAULT_DEX_CONFIRMATIONS,
            skip_if_initialized: false,
        }
    }
}

impl BootstrapConfig {
    /// Check the values that would make the sequence fail half way
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.init_gas_limit == 0 {
            return Err(ScriptError::InvalidConfig(String::from(
                "init gas limit must be positive",
            )));
        }
        if self.dex_confirmations == 0 {
            return Err(ScriptError::InvalidConfig(String::from(
                "dex confirmations must be positive",
            )));
        }
        if self.init_tokens > self.dex_allowance {
            return Err(ScriptError::InvalidConfig(format!(
                "init tokens ({}) exceed the dex allowance ({})",
                self.init_tokens, self.dex_allowance
            )));
        }
        Ok(())
    }
}

/// Convert a decimal amount of whole units into 18 decimals base units
pub fn ether(amount: &str) -> Result<U256, ScriptError> {
    parse_ether(amount.trim())
        .map_err(|e| ScriptError::InvalidConfig(format!("invalid amount {amount:?}: {e}")))
}
