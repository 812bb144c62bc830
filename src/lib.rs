// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Zilwrap - Client for the Zilwrap token on Zilliqa
//!
//! Wraps native ZIL into a ZRC-2 fungible token and back, and exposes the
//! token's transfer, allowance and balance operations with local input
//! validation and balance pre-checks.
//!
//! ## Modules
//!
//! - `blockchain` - Zilliqa addresses, JSON-RPC client and transaction types
//! - `config` - Validated client configuration
//! - `validation` - Address and amount normalization
//! - `zilwrap` - Token operations facade

pub mod blockchain;
pub mod config;
pub mod error;
pub mod events;
pub mod validation;
pub mod zilwrap;

#[cfg(test)]
mod testing;

pub use config::{Settings, ZilwrapConfig};
pub use error::ZilwrapError;
pub use events::{EventHook, ZilwrapEvent};
pub use validation::{normalize_address, normalize_amount};
pub use zilwrap::Zilwrap;
