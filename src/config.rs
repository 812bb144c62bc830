// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Client Configuration
//!
//! A [`ZilwrapConfig`] is built once, validated completely, and never
//! changes afterwards. It can be assembled in code with
//! [`ZilwrapConfig::new`] or loaded from the environment with
//! [`ZilwrapConfig::from_env`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ZILWRAP_NETWORK` | `mainnet`, `testnet` or `isolated` | `testnet` |
//! | `ZILWRAP_PRIVATE_KEY` | Hex-encoded signing key | Required |
//! | `ZILWRAP_CONTRACT_ADDRESS` | Zilwrap contract (bech32 or hex) | Network default |
//! | `ZILWRAP_GAS_PRICE` | Gas price override in Qa | Network minimum |
//! | `ZILWRAP_GAS_LIMIT` | Gas limit override | `25000` |

use alloy::primitives::U256;

use crate::blockchain::{Account, Address, Network, TxParams, GAS_LIMIT, GAS_PRICE};
use crate::error::ZilwrapError;
use crate::validation::normalize_address;

/// Environment variable name for the target network.
pub const NETWORK_ENV: &str = "ZILWRAP_NETWORK";

/// Environment variable name for the signing key.
///
/// The key never appears in logs or error messages.
pub const PRIVATE_KEY_ENV: &str = "ZILWRAP_PRIVATE_KEY";

/// Environment variable name for the contract address override.
pub const CONTRACT_ADDRESS_ENV: &str = "ZILWRAP_CONTRACT_ADDRESS";

/// Environment variable name for the gas price override (Qa).
pub const GAS_PRICE_ENV: &str = "ZILWRAP_GAS_PRICE";

/// Environment variable name for the gas limit override.
pub const GAS_LIMIT_ENV: &str = "ZILWRAP_GAS_LIMIT";

/// Optional overrides of the per-network defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub contract_address: Option<String>,
    /// Gas price in Qa; must be positive
    pub gas_price: Option<u128>,
    /// Must be positive
    pub gas_limit: Option<u64>,
}

/// Validated client configuration.
#[derive(Debug, Clone)]
pub struct ZilwrapConfig {
    network: Network,
    account: Account,
    contract_address: Address,
    gas_price: Option<U256>,
    gas_limit: u64,
}

impl ZilwrapConfig {
    /// Validate and assemble a configuration.
    ///
    /// A contract address override is honored on every network. Mainnet has
    /// no default deployment, so it needs one.
    pub fn new(
        network: Network,
        private_key: &str,
        settings: Settings,
    ) -> Result<Self, ZilwrapError> {
        let account = Account::from_private_key(private_key)?;

        let default_contract = network.config().wrapper_contract;
        let contract_address = match (&settings.contract_address, default_contract) {
            (Some(address), _) => normalize_address(address)?,
            (None, Some(default)) => normalize_address(default)?,
            (None, None) => return Err(ZilwrapError::MissingContractAddress(network)),
        };

        if settings.gas_price == Some(0) {
            return Err(ZilwrapError::InvalidConfig(
                "gas price must be positive".to_string(),
            ));
        }
        if settings.gas_limit == Some(0) {
            return Err(ZilwrapError::InvalidConfig(
                "gas limit must be positive".to_string(),
            ));
        }

        Ok(Self {
            network,
            account,
            contract_address,
            gas_price: settings.gas_price.map(U256::from),
            gas_limit: settings.gas_limit.unwrap_or(GAS_LIMIT),
        })
    }

    /// Load configuration from the `ZILWRAP_*` environment variables.
    pub fn from_env() -> Result<Self, ZilwrapError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ZilwrapError> {
        let network = match lookup(NETWORK_ENV) {
            Some(raw) => raw.parse::<Network>().map_err(ZilwrapError::InvalidConfig)?,
            None => Network::Testnet,
        };

        let private_key = lookup(PRIVATE_KEY_ENV)
            .ok_or_else(|| ZilwrapError::InvalidConfig(format!("{PRIVATE_KEY_ENV} is not set")))?;

        let gas_price = lookup(GAS_PRICE_ENV)
            .map(|raw| {
                raw.trim().parse::<u128>().map_err(|e| {
                    ZilwrapError::InvalidConfig(format!("{GAS_PRICE_ENV}={raw}: {e}"))
                })
            })
            .transpose()?;

        let gas_limit = lookup(GAS_LIMIT_ENV)
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|e| {
                    ZilwrapError::InvalidConfig(format!("{GAS_LIMIT_ENV}={raw}: {e}"))
                })
            })
            .transpose()?;

        let settings = Settings {
            contract_address: lookup(CONTRACT_ADDRESS_ENV),
            gas_price,
            gas_limit,
        };

        Self::new(network, &private_key, settings)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// Gas price override, if one was configured.
    pub fn gas_price_override(&self) -> Option<U256> {
        self.gas_price
    }

    /// Transaction parameters before `init` has consulted the network.
    pub fn tx_params(&self) -> TxParams {
        TxParams {
            version: self.network.config().version(),
            gas_price: self.gas_price.unwrap_or(U256::from(GAS_PRICE)),
            gas_limit: self.gas_limit,
        }
    }
}
