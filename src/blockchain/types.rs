// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use alloy::primitives::U256;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};

use super::address::Address;
use super::units::format_amount;

/// Zilliqa network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// RPC endpoint URL
    pub rpc_url: &'static str,
    /// Chain ID
    pub chain_id: u16,
    /// Transaction message version
    pub msg_version: u16,
    /// Default Zilwrap contract (bech32), if one is deployed
    pub wrapper_contract: Option<&'static str>,
}

impl NetworkConfig {
    /// Transaction `version` field: chain id in the high 16 bits, message
    /// version in the low 16 bits.
    pub const fn version(&self) -> u32 {
        pack(self.chain_id, self.msg_version)
    }
}

/// Zilliqa mainnet configuration.
pub const ZIL_MAINNET: NetworkConfig = NetworkConfig {
    name: "Zilliqa Mainnet",
    rpc_url: "https://api.zilliqa.com",
    chain_id: 1,
    msg_version: 1,
    wrapper_contract: None,
};

/// Zilliqa developer testnet configuration.
pub const ZIL_TESTNET: NetworkConfig = NetworkConfig {
    name: "Zilliqa Testnet",
    rpc_url: "https://dev-api.zilliqa.com",
    chain_id: 333,
    msg_version: 1,
    wrapper_contract: Some("zil1r9lexrfs44555yj8t0tuyjk8z3an0h4dv2qv2l"),
};

/// Zilliqa isolated server configuration.
pub const ZIL_ISOLATED: NetworkConfig = NetworkConfig {
    name: "Zilliqa Isolated Server",
    rpc_url: "https://zilliqa-isolated-server.zilliqa.com",
    chain_id: 222,
    msg_version: 1,
    wrapper_contract: Some("zil17qh89yvllqt63dwd4hexx758kcw8lu75z3hzzf"),
};

/// Default gas limit for contract calls.
pub const GAS_LIMIT: u64 = 25_000;

/// Default gas price in Qa, used until `init` resolves the network minimum.
pub const GAS_PRICE: u128 = 2_000_000_000;

const fn pack(high: u16, low: u16) -> u32 {
    ((high as u32) << 16) | low as u32
}

/// Supported networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Testnet,
    Isolated,
}

impl Network {
    pub fn config(&self) -> &'static NetworkConfig {
        match self {
            Network::Mainnet => &ZIL_MAINNET,
            Network::Testnet => &ZIL_TESTNET,
            Network::Isolated => &ZIL_ISOLATED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Isolated => "isolated",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "isolated" => Ok(Network::Isolated),
            other => Err(format!(
                "Unknown network `{other}` (expected mainnet, testnet or isolated)"
            )),
        }
    }
}

/// Parameters attached to every transaction sent by a client instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxParams {
    pub version: u32,
    /// Gas price in Qa
    pub gas_price: U256,
    pub gas_limit: u64,
}

/// Native account state returned by `GetBalance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Balance in Qa, as a decimal string
    pub balance: String,
    pub nonce: u64,
}

/// Wrapped-token balance of one holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Balance {
    /// Balance in the token's smallest unit
    #[serde(serialize_with = "serialize_decimal")]
    pub balance: U256,
}

impl Balance {
    /// Balance formatted with the token's decimals.
    pub fn formatted(&self, decimals: u8) -> String {
        format_amount(self.balance, decimals)
    }
}

/// Allowances granted by one holder, keyed by spender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allowance {
    pub holder: Address,
    #[serde(serialize_with = "serialize_decimal_map")]
    pub allowances: BTreeMap<Address, U256>,
}

impl Allowance {
    /// Remaining allowance for `spender`; zero when none was granted.
    pub fn for_spender(&self, spender: &Address) -> U256 {
        self.allowances.get(spender).copied().unwrap_or_default()
    }
}

fn serialize_decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

fn serialize_decimal_map<S: Serializer>(
    map: &BTreeMap<Address, U256>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(map.iter().map(|(k, v)| (k.to_hex(), v.to_string())))
}

/// ZRC-2 transitions invoked by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Mint,
    Burn,
    Transfer,
    TransferFrom,
    IncreaseAllowance,
    DecreaseAllowance,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Mint => "Mint",
            Transition::Burn => "Burn",
            Transition::Transfer => "Transfer",
            Transition::TransferFrom => "TransferFrom",
            Transition::IncreaseAllowance => "IncreaseAllowance",
            Transition::DecreaseAllowance => "DecreaseAllowance",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed Scilla value (`vname` / `type` / `value`), used both for
/// transition arguments and for event log parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractParam {
    pub vname: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: Value,
}

impl ContractParam {
    pub fn by_str20(vname: &str, address: &Address) -> Self {
        Self {
            vname: vname.to_string(),
            ty: "ByStr20".to_string(),
            value: Value::String(address.to_prefixed_hex()),
        }
    }

    pub fn uint128(vname: &str, amount: U256) -> Self {
        Self {
            vname: vname.to_string(),
            ty: "Uint128".to_string(),
            value: Value::String(amount.to_string()),
        }
    }
}

/// A transition call: name, arguments and native amount (Qa) sent along.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCall {
    pub transition: Transition,
    pub params: Vec<ContractParam>,
    pub amount: U256,
}

impl ContractCall {
    pub fn new(transition: Transition, params: Vec<ContractParam>) -> Self {
        Self {
            transition,
            params,
            amount: U256::ZERO,
        }
    }

    pub fn with_amount(mut self, amount: U256) -> Self {
        self.amount = amount;
        self
    }

    /// Look up an argument by name.
    pub fn param(&self, vname: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|p| p.vname == vname)
            .map(|p| &p.value)
    }

    /// The `data` field of the transaction: `{"_tag": ..., "params": [...]}`.
    pub fn data(&self) -> Value {
        json!({
            "_tag": self.transition.as_str(),
            "params": self.params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_versions() {
        assert_eq!(ZIL_MAINNET.version(), 65_537);
        assert_eq!(ZIL_TESTNET.version(), 21_823_489);
        assert_eq!(ZIL_ISOLATED.version(), 14_548_993);
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("Mainnet".parse::<Network>(), Ok(Network::Mainnet));
        assert_eq!(" testnet ".parse::<Network>(), Ok(Network::Testnet));
        assert_eq!("ISOLATED".parse::<Network>(), Ok(Network::Isolated));
        assert!("devnet".parse::<Network>().is_err());
        assert_eq!(Network::Testnet.config().chain_id, 333);
    }

    #[test]
    fn test_contract_call_data() {
        let to: Address = "0x4BAF5faDA8e5Db92C3d3242618c5B47133AE003C".parse().unwrap();
        let call = ContractCall::new(
            Transition::Transfer,
            vec![
                ContractParam::by_str20("to", &to),
                ContractParam::uint128("amount", U256::from(5_000u64)),
            ],
        );

        assert_eq!(
            call.data(),
            json!({
                "_tag": "Transfer",
                "params": [
                    {"vname": "to", "type": "ByStr20", "value": "0x4baf5fada8e5db92c3d3242618c5b47133ae003c"},
                    {"vname": "amount", "type": "Uint128", "value": "5000"},
                ]
            })
        );
        assert_eq!(call.param("amount"), Some(&json!("5000")));
        assert_eq!(call.param("from"), None);
        assert!(call.amount.is_zero());
    }

    #[test]
    fn test_balance_and_allowance_serialize_as_decimal_strings() {
        let balance = Balance {
            balance: U256::from(10_000_000_000_000u64),
        };
        assert_eq!(
            serde_json::to_value(balance).unwrap(),
            json!({"balance": "10000000000000"})
        );
        assert_eq!(balance.formatted(12), "10");

        let holder: Address = "0x4BAF5faDA8e5Db92C3d3242618c5B47133AE003C".parse().unwrap();
        let spender: Address = "zil1r9lexrfs44555yj8t0tuyjk8z3an0h4dv2qv2l".parse().unwrap();
        let allowance = Allowance {
            holder,
            allowances: BTreeMap::from([(spender, U256::from(7u64))]),
        };
        assert_eq!(
            serde_json::to_value(&allowance).unwrap(),
            json!({
                "holder": "4baf5fada8e5db92c3d3242618c5b47133ae003c",
                "allowances": {"197f930d30ad694a12475bd7c24ac7147b37dead": "7"}
            })
        );
        assert_eq!(allowance.for_spender(&spender), U256::from(7u64));
        assert_eq!(allowance.for_spender(&holder), U256::ZERO);
    }
}
