//! In memory chain running just enough of Balloons and the DEX to check the
//! bootstrap sequence

#![allow(dead_code)]

use std::{collections::HashMap, fs, path::Path, sync::Mutex};

use alloy::{
    primitives::{address, keccak256, Address, Bytes, U256},
    sol_types::{SolInterface, SolValue},
};
use dex_scripts::{
    deploy::address::predict_contract_address,
    errors::ScriptError,
    tx::{
        abi::{IBalloons::IBalloonsCalls, IDex::IDexCalls},
        client::{ChainClient, TxOutcome, TxRequest},
    },
};

pub const DEPLOYER: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
pub const RECIPIENT: Address = address!("059d1a9217c879B3e1cF1f9ee6e69fc6886b3bb2");

pub const SEPOLIA: u64 = 11155111;
pub const LOCAL: u64 = 31337;

/// Fake creation code of each contract
pub const BALLOONS_CODE: [u8; 2] = [0xba, 0x11];
pub const DEX_CODE: [u8; 2] = [0xde, 0x30];

pub const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

pub fn ether(whole: u128) -> U256 {
    U256::from(whole * ONE_ETHER)
}

/// Write the two artifacts in `dir`
pub fn write_artifacts(dir: &Path) {
    fs::write(dir.join("Balloons.json"), r#"{"bytecode": "0xba11"}"#).unwrap();
    fs::write(dir.join("DEX.json"), r#"{"bytecode": "0xde30"}"#).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contract {
    Balloons,
    Dex { token: Address },
}

/// A transaction the chain accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub label: String,
    pub value: U256,
    pub gas_limit: Option<u128>,
    pub confirmations: u64,
}

#[derive(Debug, Default)]
pub struct State {
    pub chain_id: u64,
    pub block: u64,
    pub nonce: u64,
    pub contracts: HashMap<Address, Contract>,
    pub native: HashMap<Address, U256>,
    /// (token, holder) => balance
    pub tokens: HashMap<(Address, Address), U256>,
    /// (token, owner, spender) => allowance
    pub allowances: HashMap<(Address, Address, Address), U256>,
    pub liquidity: HashMap<Address, U256>,
    pub submitted: Vec<Submitted>,
    /// Creation attempts, including rejected ones
    pub creation_attempts: Vec<String>,
    pub allowance_at_init: Option<U256>,
    /// Creation code prefix the chain rejects
    pub reject_creation_of: Option<[u8; 2]>,
}

pub struct MockChain {
    pub state: Mutex<State>,
}

impl MockChain {
    pub fn new(chain_id: u64) -> Self {
        let mut state = State {
            chain_id,
            ..Default::default()
        };
        state.native.insert(DEPLOYER, ether(10_000));
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn labels(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .submitted
            .iter()
            .map(|s| s.label.clone())
            .collect()
    }

    pub fn token_balance(&self, token: Address, holder: Address) -> U256 {
        self.state.lock().unwrap().token_balance(token, holder)
    }

    pub fn native_of(&self, account: Address) -> U256 {
        self.state.lock().unwrap().native_of(account)
    }

    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.state
            .lock()
            .unwrap()
            .allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }
}

impl State {
    fn token_balance(&self, token: Address, holder: Address) -> U256 {
        self.tokens.get(&(token, holder)).copied().unwrap_or_default()
    }

    fn native_of(&self, account: Address) -> U256 {
        self.native.get(&account).copied().unwrap_or_default()
    }

    fn move_tokens(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), ScriptError> {
        let balance = self.token_balance(token, from);
        if balance < amount {
            return Err(revert("ERC20: transfer amount exceeds balance"));
        }
        self.tokens.insert((token, from), balance - amount);
        let credited = self.token_balance(token, to) + amount;
        self.tokens.insert((token, to), credited);
        Ok(())
    }

    fn move_native(&mut self, from: Address, to: Address, value: U256) -> Result<(), ScriptError> {
        let balance = self.native_of(from);
        if balance < value {
            return Err(ScriptError::ContractInteraction(String::from(
                "insufficient funds for gas * price + value",
            )));
        }
        self.native.insert(from, balance - value);
        let credited = self.native_of(to) + value;
        self.native.insert(to, credited);
        Ok(())
    }

    fn create(&mut self, input: &Bytes) -> Result<(String, Address), ScriptError> {
        let prefix = [input[0], input[1]];
        let label = match prefix {
            BALLOONS_CODE => "Balloons",
            DEX_CODE => "DEX",
            _ => return Err(ScriptError::ContractInteraction(String::from("invalid opcode"))),
        };
        self.creation_attempts.push(label.to_string());
        if self.reject_creation_of == Some(prefix) {
            return Err(ScriptError::ContractInteraction(String::from(
                "execution reverted",
            )));
        }

        let address = predict_contract_address(DEPLOYER, self.nonce);
        let contract = if prefix == BALLOONS_CODE {
            // Balloons mints its whole supply to the deployer
            self.tokens.insert((address, DEPLOYER), ether(1_000));
            Contract::Balloons
        } else {
            let token = Address::abi_decode(&input[2..], true)
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
            Contract::Dex { token }
        };
        self.contracts.insert(address, contract);

        Ok((format!("create:{label}"), address))
    }

    fn call(&mut self, to: Address, request: &TxRequest) -> Result<String, ScriptError> {
        match self.contracts.get(&to).cloned() {
            Some(Contract::Balloons) => {
                match IBalloonsCalls::abi_decode(&request.input, true)
                    .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
                {
                    IBalloonsCalls::transfer(call) => {
                        self.move_tokens(to, DEPLOYER, call.to, call.amount)?;
                        Ok(String::from("transfer"))
                    }
                    IBalloonsCalls::approve(call) => {
                        self.allowances
                            .insert((to, DEPLOYER, call.spender), call.amount);
                        Ok(String::from("approve"))
                    }
                    _ => Err(revert("view function")),
                }
            }
            Some(Contract::Dex { token }) => {
                match IDexCalls::abi_decode(&request.input, true)
                    .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
                {
                    IDexCalls::init(call) => {
                        if self.liquidity.get(&to).copied().unwrap_or_default() > U256::ZERO {
                            return Err(revert("DEX: init - already has liquidity"));
                        }
                        let allowance = self
                            .allowances
                            .get(&(token, DEPLOYER, to))
                            .copied()
                            .unwrap_or_default();
                        self.allowance_at_init = Some(allowance);
                        if allowance < call.tokens {
                            return Err(revert("ERC20: insufficient allowance"));
                        }
                        self.allowances
                            .insert((token, DEPLOYER, to), allowance - call.tokens);
                        self.move_tokens(token, DEPLOYER, to, call.tokens)?;
                        self.move_native(DEPLOYER, to, request.value)?;
                        self.liquidity.insert(to, request.value);
                        Ok(String::from("init"))
                    }
                    _ => Err(revert("view function")),
                }
            }
            None => {
                self.move_native(DEPLOYER, to, request.value)?;
                Ok(String::from("native"))
            }
        }
    }

    fn read(&self, to: Address, input: &Bytes) -> Result<Bytes, ScriptError> {
        let value = match self.contracts.get(&to) {
            Some(Contract::Balloons) => match IBalloonsCalls::abi_decode(input, true)
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
            {
                IBalloonsCalls::balanceOf(call) => self.token_balance(to, call.account),
                IBalloonsCalls::allowance(call) => self
                    .allowances
                    .get(&(to, call.owner, call.spender))
                    .copied()
                    .unwrap_or_default(),
                _ => return Err(revert("not a view function")),
            },
            Some(Contract::Dex { .. }) => match IDexCalls::abi_decode(input, true)
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
            {
                IDexCalls::totalLiquidity(_) => {
                    self.liquidity.get(&to).copied().unwrap_or_default()
                }
                _ => return Err(revert("not a view function")),
            },
            None => return Ok(Bytes::new()),
        };

        Ok(value.abi_encode().into())
    }
}

fn revert(reason: &str) -> ScriptError {
    ScriptError::TransactionReverted(format!("execution reverted: {reason}"))
}

impl ChainClient for MockChain {
    fn deployer(&self) -> Address {
        DEPLOYER
    }

    async fn chain_id(&self) -> Result<u64, ScriptError> {
        Ok(self.state.lock().unwrap().chain_id)
    }

    async fn nonce(&self) -> Result<u64, ScriptError> {
        Ok(self.state.lock().unwrap().nonce)
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, ScriptError> {
        let state = self.state.lock().unwrap();
        Ok(match state.contracts.get(&address) {
            Some(_) => Bytes::from(vec![0x60, 0x80]),
            None => Bytes::new(),
        })
    }

    async fn native_balance(&self, address: Address) -> Result<U256, ScriptError> {
        Ok(self.native_of(address))
    }

    async fn read_call(&self, to: Address, input: Bytes) -> Result<Bytes, ScriptError> {
        self.state.lock().unwrap().read(to, &input)
    }

    async fn submit(&self, request: TxRequest) -> Result<TxOutcome, ScriptError> {
        let mut state = self.state.lock().unwrap();

        let (label, contract_address) = match request.to {
            None => {
                let (label, address) = state.create(&request.input)?;
                (label, Some(address))
            }
            Some(to) => (state.call(to, &request)?, None),
        };

        let nonce = state.nonce;
        state.nonce += 1;
        state.block += 1;
        let block_number = state.block;
        state.submitted.push(Submitted {
            label,
            value: request.value,
            gas_limit: request.gas_limit,
            confirmations: request.confirmations,
        });

        Ok(TxOutcome {
            hash: keccak256(nonce.to_be_bytes()),
            from: DEPLOYER,
            block_number: Some(block_number),
            contract_address,
            gas_used: 21_000,
            effective_gas_price: 1_000_000_000,
        })
    }
}
