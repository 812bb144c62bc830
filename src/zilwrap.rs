// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token operations on a Zilwrap contract.
//!
//! [`Zilwrap`] validates caller input, checks freshly queried on-chain state
//! and only then submits the ZRC-2 transition through its
//! [`ZilliqaProvider`]. The checks are advisory: state may change between the
//! query and the call, and the contract remains the final authority.
//!
//! ```rust,ignore
//! let config = ZilwrapConfig::from_env()?;
//! let provider = ZilliqaClient::for_network(config.network(), signer)?;
//! let mut zilwrap = Zilwrap::new(config, provider);
//! zilwrap.init().await?;
//!
//! let receipt = zilwrap.wrap("10").await?;
//! let balance = zilwrap.check_balance(None).await?;
//! ```

use std::collections::BTreeMap;

use alloy::primitives::U256;
use serde_json::{Map, Value};

use crate::blockchain::{
    zil_to_qa, Account, Address, Allowance, Balance, ContractCall, ContractParam, Network,
    Transition, TxParams, TxReceipt, ZilliqaProvider,
};
use crate::config::ZilwrapConfig;
use crate::error::ZilwrapError;
use crate::events::{EventHook, ZilwrapEvent};
use crate::validation::{normalize_address, normalize_amount};

/// Contract field holding token balances.
const BALANCES_FIELD: &str = "balances";

/// Contract field holding allowances, keyed by holder then spender.
const ALLOWANCES_FIELD: &str = "allowances";

/// Client for one account against one Zilwrap contract.
pub struct Zilwrap<P> {
    provider: P,
    account: Account,
    contract_address: Address,
    network: Network,
    tx_params: TxParams,
    gas_price_override: bool,
    events: Option<EventHook>,
}

impl<P: ZilliqaProvider> Zilwrap<P> {
    pub fn new(config: ZilwrapConfig, provider: P) -> Self {
        let account = config.account().clone();

        tracing::info!(
            address = %account.address(),
            network = %config.network(),
            contract = %config.contract_address(),
            "Zilwrap account added"
        );

        Self {
            provider,
            contract_address: config.contract_address(),
            network: config.network(),
            tx_params: config.tx_params(),
            gas_price_override: config.gas_price_override().is_some(),
            account,
            events: None,
        }
    }

    /// Install a callback that receives every [`ZilwrapEvent`].
    pub fn with_event_hook(mut self, hook: EventHook) -> Self {
        self.events = Some(hook);
        self.emit(ZilwrapEvent::AccountAdded {
            address: self.account.address(),
        });
        self
    }

    /// Settle the gas price used for every later call.
    ///
    /// Without a configured override this asks the network for its minimum
    /// gas price once; the result is kept for the lifetime of the instance.
    pub async fn init(&mut self) -> Result<(), ZilwrapError> {
        if !self.gas_price_override {
            let raw = self
                .provider
                .get_minimum_gas_price()
                .await?
                .ok_or(ZilwrapError::GasPriceUnavailable)?;
            self.tx_params.gas_price =
                parse_decimal(&raw).ok_or(ZilwrapError::GasPriceUnavailable)?;
        }

        tracing::info!(
            gas_price = %self.tx_params.gas_price,
            from_network = !self.gas_price_override,
            "Gas price resolved"
        );
        self.emit(ZilwrapEvent::GasPriceResolved {
            gas_price: self.tx_params.gas_price,
            from_network: !self.gas_price_override,
        });

        Ok(())
    }

    pub fn wallet_address(&self) -> Address {
        self.account.address()
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn tx_params(&self) -> &TxParams {
        &self.tx_params
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Wrap `amount` ZIL into tokens by calling `Mint` with the amount
    /// attached in Qa.
    pub async fn wrap(&self, amount: &str) -> Result<TxReceipt, ZilwrapError> {
        let zil = normalize_amount(amount)?;
        let qa = zil_to_qa(zil).ok_or_else(|| ZilwrapError::InvalidAmount(amount.to_string()))?;

        let available = self.native_balance().await?;
        if qa > available {
            return Err(ZilwrapError::InsufficientNativeBalance {
                requested: qa,
                available,
            });
        }

        self.submit(ContractCall::new(Transition::Mint, vec![]).with_amount(qa))
            .await
    }

    /// Burn `amount` tokens back into ZIL.
    pub async fn unwrap(&self, amount: &str) -> Result<TxReceipt, ZilwrapError> {
        let amount = normalize_amount(amount)?;
        self.ensure_token_balance(amount).await?;

        self.submit(ContractCall::new(
            Transition::Burn,
            vec![ContractParam::uint128("amount", amount)],
        ))
        .await
    }

    pub async fn transfer(&self, recipient: &str, amount: &str) -> Result<TxReceipt, ZilwrapError> {
        let recipient = normalize_address(recipient)?;
        let amount = normalize_amount(amount)?;
        self.ensure_token_balance(amount).await?;

        self.submit(ContractCall::new(
            Transition::Transfer,
            vec![
                ContractParam::by_str20("to", &recipient),
                ContractParam::uint128("amount", amount),
            ],
        ))
        .await
    }

    /// Move tokens out of `sender`'s balance using the allowance `sender`
    /// granted to this wallet.
    pub async fn transfer_from(
        &self,
        sender: &str,
        recipient: &str,
        amount: &str,
    ) -> Result<TxReceipt, ZilwrapError> {
        let sender = normalize_address(sender)?;
        let recipient = normalize_address(recipient)?;
        let amount = normalize_amount(amount)?;

        let available = self.spender_allowance(&sender, &self.wallet_address()).await?;
        if amount > available {
            return Err(ZilwrapError::InsufficientAllowance {
                requested: amount,
                available,
            });
        }

        self.submit(ContractCall::new(
            Transition::TransferFrom,
            vec![
                ContractParam::by_str20("from", &sender),
                ContractParam::by_str20("to", &recipient),
                ContractParam::uint128("amount", amount),
            ],
        ))
        .await
    }

    pub async fn increase_allowance(
        &self,
        spender: &str,
        amount: &str,
    ) -> Result<TxReceipt, ZilwrapError> {
        let spender = normalize_address(spender)?;
        let amount = normalize_amount(amount)?;

        self.submit(ContractCall::new(
            Transition::IncreaseAllowance,
            vec![
                ContractParam::by_str20("spender", &spender),
                ContractParam::uint128("amount", amount),
            ],
        ))
        .await
    }

    pub async fn decrease_allowance(
        &self,
        spender: &str,
        amount: &str,
    ) -> Result<TxReceipt, ZilwrapError> {
        let spender = normalize_address(spender)?;
        let amount = normalize_amount(amount)?;

        let available = self.spender_allowance(&self.wallet_address(), &spender).await?;
        if amount > available {
            return Err(ZilwrapError::InsufficientAllowance {
                requested: amount,
                available,
            });
        }

        self.submit(ContractCall::new(
            Transition::DecreaseAllowance,
            vec![
                ContractParam::by_str20("spender", &spender),
                ContractParam::uint128("amount", amount),
            ],
        ))
        .await
    }

    /// Token balance of `address`, or of the wallet when `None`.
    ///
    /// An address the contract has never credited has a balance of zero.
    pub async fn check_balance(&self, address: Option<&str>) -> Result<Balance, ZilwrapError> {
        let address = match address {
            Some(input) => normalize_address(input)?,
            None => self.wallet_address(),
        };

        let balance = self.token_balance_of(&address).await?;
        self.emit(ZilwrapEvent::BalanceChecked { address, balance });

        Ok(Balance { balance })
    }

    /// Allowances granted by `holder`, optionally narrowed to one spender.
    ///
    /// A spender the holder never approved is reported with an explicit zero.
    pub async fn check_allowance(
        &self,
        holder: &str,
        spender: Option<&str>,
    ) -> Result<Allowance, ZilwrapError> {
        let holder = normalize_address(holder)?;
        let spender = spender.map(normalize_address).transpose()?;

        let mut allowances = self
            .allowances_of(&holder)
            .await?
            .ok_or_else(|| ZilwrapError::AllowanceStateUnavailable(holder.to_string()))?;
        if let Some(spender) = spender {
            let amount = allowances.get(&spender).copied().unwrap_or_default();
            allowances = BTreeMap::from([(spender, amount)]);
        }

        self.emit(ZilwrapEvent::AllowanceChecked {
            holder,
            spenders: allowances.len(),
        });

        Ok(Allowance { holder, allowances })
    }

    async fn native_balance(&self) -> Result<U256, ZilwrapError> {
        let address = self.wallet_address();
        let failed = || ZilwrapError::BalanceQueryFailed(address.to_string());

        let account = self.provider.get_balance(&address).await?.ok_or_else(failed)?;
        parse_decimal(&account.balance).ok_or_else(failed)
    }

    async fn ensure_token_balance(&self, requested: U256) -> Result<(), ZilwrapError> {
        let available = self.token_balance_of(&self.wallet_address()).await?;
        if requested > available {
            return Err(ZilwrapError::InsufficientTokenBalance {
                requested,
                available,
            });
        }
        Ok(())
    }

    async fn token_balance_of(&self, address: &Address) -> Result<U256, ZilwrapError> {
        let failed = || ZilwrapError::BalanceQueryFailed(address.to_string());

        tracing::debug!(address = %address, "Querying token balance");
        let state = self
            .provider
            .get_sub_state(&self.contract_address, BALANCES_FIELD, &[])
            .await?
            .ok_or_else(failed)?;
        let balances = state
            .get(BALANCES_FIELD)
            .and_then(Value::as_object)
            .ok_or_else(failed)?;

        match entry_for(balances, address) {
            None => Ok(U256::ZERO),
            Some(value) => value.as_str().and_then(parse_decimal).ok_or_else(failed),
        }
    }

    /// Allowances granted by `holder`, or `None` when the contract holds no
    /// allowance entry for it.
    async fn allowances_of(
        &self,
        holder: &Address,
    ) -> Result<Option<BTreeMap<Address, U256>>, ZilwrapError> {
        let unavailable = || ZilwrapError::AllowanceStateUnavailable(holder.to_string());

        tracing::debug!(holder = %holder, "Querying allowances");
        let state = self
            .provider
            .get_sub_state(&self.contract_address, ALLOWANCES_FIELD, &[])
            .await?
            .ok_or_else(unavailable)?;
        let holders = state
            .get(ALLOWANCES_FIELD)
            .and_then(Value::as_object)
            .ok_or_else(unavailable)?;

        let Some(granted) = entry_for(holders, holder) else {
            return Ok(None);
        };

        granted
            .as_object()
            .ok_or_else(unavailable)?
            .iter()
            .map(|(spender, amount)| {
                let spender = spender.parse::<Address>().ok()?;
                let amount = amount.as_str().and_then(parse_decimal)?;
                Some((spender, amount))
            })
            .collect::<Option<BTreeMap<_, _>>>()
            .map(Some)
            .ok_or_else(unavailable)
    }

    /// Allowance `holder` granted to `spender`. A holder without any
    /// allowance entry has granted nothing.
    async fn spender_allowance(
        &self,
        holder: &Address,
        spender: &Address,
    ) -> Result<U256, ZilwrapError> {
        let allowances = self.allowances_of(holder).await?.unwrap_or_default();
        Ok(allowances.get(spender).copied().unwrap_or_default())
    }

    async fn submit(&self, call: ContractCall) -> Result<TxReceipt, ZilwrapError> {
        tracing::info!(
            transition = %call.transition,
            amount = %call.amount,
            contract = %self.contract_address,
            "Submitting contract call"
        );
        self.emit(ZilwrapEvent::CallSubmitted {
            transition: call.transition,
            amount: call.amount,
        });

        let receipt = self
            .provider
            .call(&self.account, &self.contract_address, &call, &self.tx_params)
            .await?;

        if receipt.success {
            tracing::info!(
                transition = %call.transition,
                tran_id = %receipt.tran_id,
                "Contract call confirmed"
            );
        } else {
            tracing::warn!(
                transition = %call.transition,
                tran_id = %receipt.tran_id,
                exceptions = ?receipt.exceptions,
                "Contract call failed"
            );
        }
        self.emit(ZilwrapEvent::CallConfirmed {
            transition: call.transition,
            tran_id: receipt.tran_id.clone(),
            success: receipt.success,
        });

        Ok(receipt)
    }

    fn emit(&self, event: ZilwrapEvent) {
        if let Some(hook) = &self.events {
            hook(&event);
        }
    }
}

/// Look up an address-keyed state map entry, whatever the key spelling.
fn entry_for<'a>(map: &'a Map<String, Value>, address: &Address) -> Option<&'a Value> {
    map.iter()
        .find(|(key, _)| key.parse::<Address>().is_ok_and(|k| k == *address))
        .map(|(_, value)| value)
}

fn parse_decimal(raw: &str) -> Option<U256> {
    normalize_amount(raw).ok()
}
