// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory chain used by the facade tests.
//!
//! Applies the ZRC-2 transitions the client invokes to a local token state
//! and answers sub-state queries in the node's JSON shape (`0x` map keys).

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use alloy::primitives::U256;
use serde_json::{json, Map, Value};

use crate::blockchain::{
    Account, AccountBalance, Address, ContractCall, ContractParam, EventLog, SdkError, Transition,
    TxParams, TxReceipt, ZilliqaProvider,
};

#[derive(Default)]
struct ChainState {
    native: HashMap<Address, (U256, u64)>,
    balances: BTreeMap<Address, U256>,
    allowances: BTreeMap<Address, BTreeMap<Address, U256>>,
    calls: Vec<(ContractCall, TxParams)>,
    min_gas_price: Option<String>,
    raw_sub_state: HashMap<String, Option<Value>>,
    tx_count: u64,
}

pub(crate) struct MockChain {
    contract: Address,
    state: Mutex<ChainState>,
}

impl MockChain {
    pub(crate) fn new(contract: Address) -> Self {
        Self {
            contract,
            state: Mutex::new(ChainState {
                min_gas_price: Some("2000000000".to_string()),
                ..Default::default()
            }),
        }
    }

    pub(crate) fn with_native(self, address: Address, qa: u64) -> Self {
        self.lock().native.insert(address, (U256::from(qa), 0));
        self
    }

    pub(crate) fn with_tokens(self, address: Address, amount: u64) -> Self {
        self.lock().balances.insert(address, U256::from(amount));
        self
    }

    pub(crate) fn with_allowance(self, holder: Address, spender: Address, amount: u64) -> Self {
        self.lock()
            .allowances
            .entry(holder)
            .or_default()
            .insert(spender, U256::from(amount));
        self
    }

    pub(crate) fn with_min_gas_price(self, price: Option<&str>) -> Self {
        self.lock().min_gas_price = price.map(str::to_string);
        self
    }

    /// Answer every query of `field` with `raw` instead of the token state.
    pub(crate) fn with_raw_sub_state(self, field: &str, raw: Option<Value>) -> Self {
        self.lock().raw_sub_state.insert(field.to_string(), raw);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(ContractCall, TxParams)> {
        self.lock().calls.clone()
    }

    pub(crate) fn token_balance(&self, address: &Address) -> U256 {
        self.lock().balances.get(address).copied().unwrap_or_default()
    }

    pub(crate) fn allowance(&self, holder: &Address, spender: &Address) -> U256 {
        self.lock()
            .allowances
            .get(holder)
            .and_then(|m| m.get(spender))
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn native_balance(&self, address: &Address) -> U256 {
        self.lock()
            .native
            .get(address)
            .map(|(balance, _)| *balance)
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ChainState> {
        self.state.lock().unwrap()
    }
}

fn amount_arg(call: &ContractCall, vname: &str) -> U256 {
    let raw = call.param(vname).and_then(Value::as_str).unwrap();
    U256::from_str_radix(raw, 10).unwrap()
}

fn address_arg(call: &ContractCall, vname: &str) -> Address {
    call.param(vname)
        .and_then(Value::as_str)
        .unwrap()
        .parse()
        .unwrap()
}

fn event(contract: &Address, name: &str, params: Vec<ContractParam>) -> EventLog {
    EventLog {
        event_name: name.to_string(),
        address: contract.to_prefixed_hex(),
        params,
    }
}

fn debit(map: &mut BTreeMap<Address, U256>, key: Address, amount: U256) -> bool {
    let current = map.get(&key).copied().unwrap_or_default();
    match current.checked_sub(amount) {
        Some(rest) => {
            map.insert(key, rest);
            true
        }
        None => false,
    }
}

fn credit(map: &mut BTreeMap<Address, U256>, key: Address, amount: U256) {
    *map.entry(key).or_default() += amount;
}

impl ChainState {
    /// Apply one transition from `sender`; `None` means the contract threw.
    fn apply(
        &mut self,
        contract: &Address,
        sender: Address,
        call: &ContractCall,
    ) -> Option<EventLog> {
        match call.transition {
            Transition::Mint => {
                let (native, _) = self.native.get_mut(&sender)?;
                *native = native.checked_sub(call.amount)?;
                credit(&mut self.balances, sender, call.amount);
                Some(event(
                    contract,
                    "Minted",
                    vec![
                        ContractParam::by_str20("recipient", &sender),
                        ContractParam::uint128("amount", call.amount),
                    ],
                ))
            }
            Transition::Burn => {
                let amount = amount_arg(call, "amount");
                if !debit(&mut self.balances, sender, amount) {
                    return None;
                }
                self.native.entry(sender).or_default().0 += amount;
                Some(event(
                    contract,
                    "Burnt",
                    vec![
                        ContractParam::by_str20("burner", &sender),
                        ContractParam::uint128("amount", amount),
                    ],
                ))
            }
            Transition::Transfer => {
                let to = address_arg(call, "to");
                let amount = amount_arg(call, "amount");
                if !debit(&mut self.balances, sender, amount) {
                    return None;
                }
                credit(&mut self.balances, to, amount);
                Some(event(
                    contract,
                    "TransferSuccess",
                    vec![
                        ContractParam::by_str20("sender", &sender),
                        ContractParam::by_str20("recipient", &to),
                        ContractParam::uint128("amount", amount),
                    ],
                ))
            }
            Transition::TransferFrom => {
                let from = address_arg(call, "from");
                let to = address_arg(call, "to");
                let amount = amount_arg(call, "amount");
                if self.balances.get(&from).copied().unwrap_or_default() < amount {
                    return None;
                }
                let granted = self.allowances.get_mut(&from)?;
                if !debit(granted, sender, amount) {
                    return None;
                }
                debit(&mut self.balances, from, amount);
                credit(&mut self.balances, to, amount);
                Some(event(
                    contract,
                    "TransferFromSuccess",
                    vec![
                        ContractParam::by_str20("initiator", &sender),
                        ContractParam::by_str20("sender", &from),
                        ContractParam::by_str20("recipient", &to),
                        ContractParam::uint128("amount", amount),
                    ],
                ))
            }
            Transition::IncreaseAllowance => {
                let spender = address_arg(call, "spender");
                let amount = amount_arg(call, "amount");
                let granted = self.allowances.entry(sender).or_default();
                credit(granted, spender, amount);
                Some(event(
                    contract,
                    "IncreasedAllowance",
                    vec![
                        ContractParam::by_str20("token_owner", &sender),
                        ContractParam::by_str20("spender", &spender),
                        ContractParam::uint128("new_allowance", granted[&spender]),
                    ],
                ))
            }
            Transition::DecreaseAllowance => {
                let spender = address_arg(call, "spender");
                let amount = amount_arg(call, "amount");
                let granted = self.allowances.entry(sender).or_default();
                let current = granted.get(&spender).copied().unwrap_or_default();
                let remaining = current.saturating_sub(amount);
                granted.insert(spender, remaining);
                Some(event(
                    contract,
                    "DecreasedAllowance",
                    vec![
                        ContractParam::by_str20("token_owner", &sender),
                        ContractParam::by_str20("spender", &spender),
                        ContractParam::uint128("new_allowance", remaining),
                    ],
                ))
            }
        }
    }
}

fn decimal_map(map: &BTreeMap<Address, U256>) -> Value {
    let entries: Map<String, Value> = map
        .iter()
        .map(|(k, v)| (k.to_prefixed_hex(), Value::String(v.to_string())))
        .collect();
    Value::Object(entries)
}

impl ZilliqaProvider for MockChain {
    async fn get_balance(&self, address: &Address) -> Result<Option<AccountBalance>, SdkError> {
        Ok(self
            .lock()
            .native
            .get(address)
            .map(|(balance, nonce)| AccountBalance {
                balance: balance.to_string(),
                nonce: *nonce,
            }))
    }

    async fn get_minimum_gas_price(&self) -> Result<Option<String>, SdkError> {
        Ok(self.lock().min_gas_price.clone())
    }

    async fn get_sub_state(
        &self,
        contract: &Address,
        field: &str,
        indices: &[String],
    ) -> Result<Option<Value>, SdkError> {
        let state = self.lock();
        if *contract != self.contract {
            return Ok(None);
        }
        if let Some(raw) = state.raw_sub_state.get(field) {
            return Ok(raw.clone());
        }

        let key = indices.first().map(|k| k.parse::<Address>().unwrap());
        let projected = match (field, key) {
            ("balances", None) => decimal_map(&state.balances),
            ("balances", Some(holder)) => match state.balances.get(&holder) {
                Some(v) => json!({ holder.to_prefixed_hex(): v.to_string() }),
                None => return Ok(None),
            },
            ("allowances", None) => Value::Object(
                state
                    .allowances
                    .iter()
                    .map(|(holder, m)| (holder.to_prefixed_hex(), decimal_map(m)))
                    .collect(),
            ),
            ("allowances", Some(holder)) => match state.allowances.get(&holder) {
                Some(m) => json!({ holder.to_prefixed_hex(): decimal_map(m) }),
                None => return Ok(None),
            },
            _ => return Ok(None),
        };

        Ok(Some(json!({ field: projected })))
    }

    async fn call(
        &self,
        account: &Account,
        contract: &Address,
        call: &ContractCall,
        params: &TxParams,
    ) -> Result<TxReceipt, SdkError> {
        let mut state = self.lock();
        let sender = account.address();
        state.calls.push((call.clone(), params.clone()));
        state.tx_count += 1;
        if let Some((_, nonce)) = state.native.get_mut(&sender) {
            *nonce += 1;
        }

        let outcome = if *contract == self.contract {
            state.apply(contract, sender, call)
        } else {
            None
        };

        Ok(TxReceipt {
            tran_id: format!("{:064x}", state.tx_count),
            success: outcome.is_some(),
            cumulative_gas: "1000".to_string(),
            epoch_num: state.tx_count.to_string(),
            event_logs: outcome.into_iter().collect(),
            exceptions: Vec::new(),
        })
    }
}
