// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Structured client events.
//!
//! A [`crate::Zilwrap`] instance can be given a hook that receives these
//! events as they happen. Without a hook, events only go to `tracing`.

use std::sync::Arc;

use alloy::primitives::U256;

use crate::blockchain::{Address, Transition};

/// Something the client did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZilwrapEvent {
    /// The signing account was loaded.
    AccountAdded { address: Address },
    /// `init` settled the gas price used for calls.
    GasPriceResolved { gas_price: U256, from_network: bool },
    /// A token balance was read from contract state.
    BalanceChecked { address: Address, balance: U256 },
    /// Allowances of a holder were read from contract state.
    AllowanceChecked { holder: Address, spenders: usize },
    /// A transition call is about to be submitted.
    CallSubmitted { transition: Transition, amount: U256 },
    /// A transition call came back with a receipt.
    CallConfirmed {
        transition: Transition,
        tran_id: String,
        success: bool,
    },
}

/// Callback invoked with every [`ZilwrapEvent`].
pub type EventHook = Arc<dyn Fn(&ZilwrapEvent) + Send + Sync>;
