// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use alloy::primitives::U256;

use crate::blockchain::{format_qa, AddressError, Network, SdkError};

/// Errors returned by the token client.
///
/// Validation and pre-check failures are raised before anything is sent to
/// the network. Provider failures are wrapped transparently.
#[derive(Debug, thiserror::Error)]
pub enum ZilwrapError {
    #[error("Address is empty")]
    EmptyAddress,

    #[error("Not a valid address: {0}")]
    InvalidAddress(String),

    #[error("Not a valid amount: {0}")]
    InvalidAmount(String),

    #[error(
        "Insufficient $ZIL balance: requested {} ZIL, available {} ZIL",
        format_qa(.requested),
        format_qa(.available)
    )]
    InsufficientNativeBalance { requested: U256, available: U256 },

    #[error("Insufficient token balance: requested {requested}, available {available}")]
    InsufficientTokenBalance { requested: U256, available: U256 },

    #[error("Insufficient allowance: requested {requested}, available {available}")]
    InsufficientAllowance { requested: U256, available: U256 },

    #[error("Could not get balance for {0}")]
    BalanceQueryFailed(String),

    #[error("Could not get allowance for holder {0}")]
    AllowanceStateUnavailable(String),

    #[error("Could not get gas price")]
    GasPriceUnavailable,

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No Zilwrap contract address configured for {0}")]
    MissingContractAddress(Network),

    #[error(transparent)]
    Sdk(#[from] SdkError),
}

impl From<AddressError> for ZilwrapError {
    fn from(e: AddressError) -> Self {
        match e {
            AddressError::Empty => ZilwrapError::EmptyAddress,
            AddressError::Invalid(input) => ZilwrapError::InvalidAddress(input),
        }
    }
}
