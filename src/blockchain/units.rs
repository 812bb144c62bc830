// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Native currency units.
//!
//! ZIL amounts on chain are expressed in Qa, the indivisible unit
//! (1 ZIL = 10^12 Qa).

use alloy::primitives::U256;

/// Number of decimals between ZIL and Qa.
pub const ZIL_DECIMALS: u8 = 12;

/// Scale a whole-ZIL amount to Qa.
///
/// Returns `None` if the result does not fit in 256 bits.
pub fn zil_to_qa(zil: U256) -> Option<U256> {
    zil.checked_mul(U256::from(10u64).pow(U256::from(ZIL_DECIMALS)))
}

/// Render a smallest-unit amount as a decimal number with `decimals`
/// fractional digits, dropping trailing zeros.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let (whole, fraction) = amount.div_rem(scale);
    if fraction.is_zero() {
        return whole.to_string();
    }

    let digits = fraction.to_string();
    let padded = format!("{digits:0>width$}", width = usize::from(decimals));
    format!("{whole}.{}", padded.trim_end_matches('0'))
}

/// Qa amount shown in ZIL, as used in balance error messages.
pub fn format_qa(qa: &U256) -> String {
    format_amount(*qa, ZIL_DECIMALS)
}
