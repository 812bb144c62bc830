// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction payloads and receipts.
//!
//! The payload is what gets signed and sent with `CreateTransaction`; the
//! receipt is read back from `GetTransaction` once the transaction is
//! confirmed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::signing::Account;
use super::types::{ContractCall, ContractParam, TxParams};

/// Number of `GetTransaction` polls before giving up on a confirmation.
pub const DEFAULT_CONFIRM_ATTEMPTS: u32 = 33;

/// Delay between confirmation polls.
pub const DEFAULT_CONFIRM_INTERVAL: Duration = Duration::from_millis(1000);

/// Unsigned transaction fields, in the JSON shape `CreateTransaction` expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxPayload {
    pub version: u32,
    pub nonce: u64,
    /// Checksummed recipient without `0x`
    pub to_addr: String,
    /// Native amount in Qa
    pub amount: String,
    pub pub_key: String,
    pub gas_price: String,
    pub gas_limit: String,
    pub code: String,
    pub data: String,
    pub priority: bool,
}

impl TxPayload {
    /// Build the payload for a transition call to `contract`.
    pub fn for_call(
        account: &Account,
        contract: &Address,
        call: &ContractCall,
        params: &TxParams,
        nonce: u64,
    ) -> Self {
        let checksum = contract.to_checksum();
        Self {
            version: params.version,
            nonce,
            to_addr: checksum.trim_start_matches("0x").to_string(),
            amount: call.amount.to_string(),
            pub_key: account.public_key_hex(),
            gas_price: params.gas_price.to_string(),
            gas_limit: params.gas_limit.to_string(),
            code: String::new(),
            data: call.data().to_string(),
            priority: false,
        }
    }
}

/// Payload plus signature.
#[derive(Debug, Clone, Serialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub payload: TxPayload,
    pub signature: String,
}

/// `CreateTransaction` result.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionResult {
    #[serde(rename = "TranID")]
    pub tran_id: String,
    #[serde(rename = "Info", default)]
    pub info: String,
}

/// An event emitted by a contract during a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    #[serde(rename = "_eventname")]
    pub event_name: String,
    pub address: String,
    #[serde(default)]
    pub params: Vec<ContractParam>,
}

impl EventLog {
    pub fn param(&self, vname: &str) -> Option<&serde_json::Value> {
        self.params
            .iter()
            .find(|p| p.vname == vname)
            .map(|p| &p.value)
    }
}

/// Transaction receipt after confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash
    #[serde(skip_deserializing)]
    pub tran_id: String,
    /// Whether the transaction was successful
    pub success: bool,
    #[serde(default)]
    pub cumulative_gas: String,
    #[serde(default)]
    pub epoch_num: String,
    #[serde(default)]
    pub event_logs: Vec<EventLog>,
    /// Scilla exceptions raised by a failed transition
    #[serde(default)]
    pub exceptions: Vec<serde_json::Value>,
}

impl TxReceipt {
    /// First event with the given name.
    pub fn event(&self, name: &str) -> Option<&EventLog> {
        self.event_logs.iter().find(|e| e.event_name == name)
    }
}

/// `GetTransaction` result, reduced to what the client needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmedTransaction {
    #[serde(rename = "ID")]
    pub id: String,
    pub receipt: TxReceipt,
}

impl ConfirmedTransaction {
    pub fn into_receipt(self) -> TxReceipt {
        TxReceipt {
            tran_id: self.id,
            ..self.receipt
        }
    }
}
