// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Zilliqa account/contract addresses.
//!
//! Addresses arrive in three spellings:
//! - bech32 with the `zil` human-readable part (`zil1...`)
//! - checksummed base16 (`0x4BAF5faDA8e5Db92C3d3242618c5B47133AE003C`)
//! - plain base16 in any case, with or without `0x`
//!
//! All of them decode to the same 20 bytes. The canonical textual form used
//! inside this crate is lowercase hex without prefix.

use std::fmt;
use std::str::FromStr;

use alloy::hex;
use bech32::{primitives::decode::CheckedHrpstring, Bech32, Hrp};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Human-readable part of Zilliqa bech32 addresses.
pub const ZIL_HRP: &str = "zil";

/// A 20-byte Zilliqa address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

/// Errors produced while decoding an address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Address is empty")]
    Empty,

    #[error("Not a valid address: {0}")]
    Invalid(String),
}

impl Address {
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Derive the address of a compressed secp256k1 public key.
    ///
    /// The address is the last 20 bytes of `sha256(pubkey)`.
    pub fn from_public_key(compressed: &[u8]) -> Self {
        let digest = Sha256::digest(compressed);
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[digest.len() - ADDRESS_LEN..]);
        Self(bytes)
    }

    /// Decode a `zil1...` bech32 address.
    pub fn from_bech32(input: &str) -> Result<Self, AddressError> {
        let invalid = || AddressError::Invalid(input.to_string());

        let checked = CheckedHrpstring::new::<Bech32>(input).map_err(|_| invalid())?;
        if !checked.hrp().as_str().eq_ignore_ascii_case(ZIL_HRP) {
            return Err(invalid());
        }

        let bytes: Vec<u8> = checked.byte_iter().collect();
        let bytes: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| invalid())?;
        Ok(Self(bytes))
    }

    /// Decode a base16 address (40 hex digits, optional `0x`, any case).
    pub fn from_hex(input: &str) -> Result<Self, AddressError> {
        let digits = strip_hex_prefix(input);
        if !is_hex_digits(digits) {
            return Err(AddressError::Invalid(input.to_string()));
        }

        hex::decode_to_array::<_, ADDRESS_LEN>(digits)
            .map(Self)
            .map_err(|_| AddressError::Invalid(input.to_string()))
    }

    /// Whether `input` is a well-formed `zil` bech32 address.
    pub fn is_bech32(input: &str) -> bool {
        Self::from_bech32(input).is_ok()
    }

    /// Whether `input` is 40 hex digits with an optional `0x` prefix.
    pub fn is_hex_address(input: &str) -> bool {
        is_hex_digits(strip_hex_prefix(input))
    }

    /// Canonical form: lowercase hex, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Lowercase hex with `0x`, as used for `ByStr20` contract arguments and
    /// as keys of contract sub-state maps.
    pub fn to_prefixed_hex(&self) -> String {
        hex::encode_prefixed(self.0)
    }

    /// Zilliqa checksummed form (`0x`-prefixed, mixed case).
    ///
    /// A letter at position `i` is upper-cased when bit `255 - 6 * i` of
    /// `sha256(address)` is set. Digits are left untouched.
    pub fn to_checksum(&self) -> String {
        let hash = Sha256::digest(self.0);
        let mut out = String::with_capacity(2 + ADDRESS_LEN * 2);
        out.push_str("0x");

        for (i, c) in self.to_hex().chars().enumerate() {
            if c.is_ascii_digit() {
                out.push(c);
                continue;
            }
            let bit = 255 - 6 * i;
            let byte = hash[31 - bit / 8];
            if (byte >> (bit % 8)) & 1 == 1 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Encode as a `zil1...` bech32 address.
    pub fn to_bech32(&self) -> Result<String, AddressError> {
        let hrp = Hrp::parse_unchecked(ZIL_HRP);
        bech32::encode::<Bech32>(hrp, &self.0)
            .map_err(|e| AddressError::Invalid(format!("bech32 encoding failed: {e}")))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    /// Accepts bech32 first, then base16.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(AddressError::Empty);
        }
        if let Ok(address) = Self::from_bech32(input) {
            return Ok(address);
        }
        Self::from_hex(input)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

fn is_hex_digits(digits: &str) -> bool {
    digits.len() == ADDRESS_LEN * 2 && digits.bytes().all(|b| b.is_ascii_hexdigit())
}
