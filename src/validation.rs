// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Input normalization for addresses and token amounts.
//!
//! Everything a caller passes in goes through here before it is used in a
//! contract call or a state lookup.

use alloy::primitives::U256;

use crate::blockchain::Address;
use crate::error::ZilwrapError;

/// Parse an address given as bech32, checksummed hex or plain hex.
///
/// Fails with [`ZilwrapError::EmptyAddress`] on an empty string and with
/// [`ZilwrapError::InvalidAddress`] (carrying the input) otherwise.
pub fn normalize_address(input: &str) -> Result<Address, ZilwrapError> {
    Ok(input.parse::<Address>()?)
}

/// Parse a token amount expressed as a decimal digit string.
///
/// Only `^[0-9]+$` is accepted: no sign, no decimal point, no whitespace.
pub fn normalize_amount(input: &str) -> Result<U256, ZilwrapError> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ZilwrapError::InvalidAmount(input.to_string()));
    }

    U256::from_str_radix(input, 10).map_err(|_| ZilwrapError::InvalidAmount(input.to_string()))
}
