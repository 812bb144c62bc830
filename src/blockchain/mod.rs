// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration module for Zilliqa.
//!
//! This module provides functionality for:
//! - Address encoding (bech32, checksummed hex)
//! - Native balance, gas price and contract sub-state queries
//! - Building, submitting and confirming contract transition calls

pub mod address;
pub mod client;
pub mod provider;
pub mod signing;
pub mod transactions;
pub mod types;
pub mod units;

pub use address::{Address, AddressError};
pub use client::ZilliqaClient;
pub use provider::{SdkError, ZilliqaProvider};
pub use signing::{Account, TransactionSigner};
pub use transactions::{EventLog, SignedTransaction, TxPayload, TxReceipt};
pub use types::*;
pub use units::{format_amount, format_qa, zil_to_qa, ZIL_DECIMALS};
