// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account keys and the transaction signing seam.
//!
//! Zilliqa transactions are Schnorr-signed over a protobuf encoding of the
//! payload. This crate does not implement either: this module only derives
//! the account identity from the private key and defines the
//! [`TransactionSigner`] trait the JSON-RPC client calls into.
//!
//! No signer ships with the crate. A caller who wants
//! [`super::ZilliqaClient`] to submit transactions must supply a
//! [`TransactionSigner`] that encodes the payload as the node's protobuf
//! `ProtoTransactionCoreInfo` and returns the Schnorr signature as hex.

use std::fmt;

use alloy::hex;
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};

use super::address::Address;
use super::provider::SdkError;
use super::transactions::TxPayload;
use crate::error::ZilwrapError;

/// A signing account: secp256k1 key pair and derived address.
#[derive(Clone)]
pub struct Account {
    secret_key: SecretKey,
    public_key: Vec<u8>,
    address: Address,
}

impl Account {
    /// Create an account from a hex-encoded private key (64 hex digits,
    /// optional `0x` prefix).
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, ZilwrapError> {
        let digits = private_key_hex
            .strip_prefix("0x")
            .unwrap_or(private_key_hex);

        let key_bytes =
            hex::decode(digits).map_err(|e| ZilwrapError::InvalidPrivateKey(e.to_string()))?;
        if key_bytes.len() != 32 {
            return Err(ZilwrapError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                key_bytes.len()
            )));
        }

        let secret_key = SecretKey::from_slice(&key_bytes)
            .map_err(|e| ZilwrapError::InvalidPrivateKey(e.to_string()))?;

        let public_key = secret_key
            .public_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec();
        let address = Address::from_public_key(&public_key);

        Ok(Self {
            secret_key,
            public_key,
            address,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Compressed public key (33 bytes).
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Compressed public key as lowercase hex, the `pubKey` transaction field.
    pub fn public_key_hex(&self) -> String {
        hex::encode(&self.public_key)
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address.to_hex())
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

/// Produces the Schnorr signature for a transaction payload.
///
/// Implemented by the caller; see the module docs.
pub trait TransactionSigner: Send + Sync {
    /// Return the hex-encoded signature of `payload` under `account`'s key.
    fn sign(&self, account: &Account, payload: &TxPayload) -> Result<String, SdkError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "e19d05c5452598e24caad4a0d85a49146f7be089515c905ae6a19e8a578a6930";

    #[test]
    fn test_account_from_private_key() {
        let account = Account::from_private_key(TEST_KEY).unwrap();
        assert_eq!(
            account.public_key_hex(),
            "0246e7178dc8253201101e18fd6f6eb9972451d121fc57aa2a06dd5c111e58dc6a"
        );
        assert_eq!(
            account.address().to_checksum(),
            "0x9BFEC715a6bD658fCb62B0f8cc9BFa2ADE71434A"
        );
    }

    #[test]
    fn test_account_accepts_prefixed_key() {
        let account = Account::from_private_key(&format!("0x{TEST_KEY}")).unwrap();
        assert_eq!(
            account.address().to_hex(),
            "9bfec715a6bd658fcb62b0f8cc9bfa2ade71434a"
        );
    }

    #[test]
    fn test_account_rejects_bad_keys() {
        for key in ["", "zz", "e19d05c5", &"00".repeat(32)] {
            assert!(
                matches!(
                    Account::from_private_key(key),
                    Err(ZilwrapError::InvalidPrivateKey(_))
                ),
                "{key}"
            );
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let account = Account::from_private_key(TEST_KEY).unwrap();
        let debug = format!("{account:?}");
        assert!(!debug.contains(TEST_KEY));
        assert!(debug.contains("9bfec715a6bd658fcb62b0f8cc9bfa2ade71434a"));
    }
}
