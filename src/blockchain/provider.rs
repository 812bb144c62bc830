// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The blockchain capabilities the token client relies on.
//!
//! [`ZilliqaProvider`] is the seam between the client and whatever talks to
//! the network. [`super::client::ZilliqaClient`] implements it over JSON-RPC;
//! tests use an in-memory chain.

use std::future::Future;

use serde_json::Value;

use super::address::Address;
use super::signing::Account;
use super::transactions::TxReceipt;
use super::types::{AccountBalance, ContractCall, TxParams};

/// Errors raised by a provider. They are passed to callers unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("RPC transport error: {0}")]
    Transport(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Unexpected RPC response: {0}")]
    Decode(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Could not get nonce for account {0}")]
    MissingNonce(Address),

    #[error("Transaction {tran_id} not confirmed after {attempts} attempts")]
    NotConfirmed { tran_id: String, attempts: u32 },
}

/// Network access required by [`crate::Zilwrap`].
///
/// Query methods return `Ok(None)` when the node answered without a result.
pub trait ZilliqaProvider: Send + Sync {
    /// Native balance and nonce of `address`.
    fn get_balance(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<Option<AccountBalance>, SdkError>> + Send;

    /// Minimum gas price accepted by the network, in Qa.
    fn get_minimum_gas_price(
        &self,
    ) -> impl Future<Output = Result<Option<String>, SdkError>> + Send;

    /// Partial contract state for `field`, optionally narrowed by map keys.
    fn get_sub_state(
        &self,
        contract: &Address,
        field: &str,
        indices: &[String],
    ) -> impl Future<Output = Result<Option<Value>, SdkError>> + Send;

    /// Sign and submit a transition call, then wait for its receipt.
    fn call(
        &self,
        account: &Account,
        contract: &Address,
        call: &ContractCall,
        params: &TxParams,
    ) -> impl Future<Output = Result<TxReceipt, SdkError>> + Send;
}
