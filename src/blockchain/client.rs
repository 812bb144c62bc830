// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Zilliqa JSON-RPC client.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};

use super::address::Address;
use super::provider::{SdkError, ZilliqaProvider};
use super::signing::{Account, TransactionSigner};
use super::transactions::{
    ConfirmedTransaction, CreateTransactionResult, SignedTransaction, TxPayload, TxReceipt,
    DEFAULT_CONFIRM_ATTEMPTS, DEFAULT_CONFIRM_INTERVAL,
};
use super::types::{AccountBalance, ContractCall, Network, TxParams};

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Zilliqa client over HTTP JSON-RPC.
pub struct ZilliqaClient {
    url: url::Url,
    http: reqwest::Client,
    signer: Box<dyn TransactionSigner>,
    confirm_attempts: u32,
    confirm_interval: Duration,
    next_id: AtomicU64,
}

impl ZilliqaClient {
    /// Create a client for the given RPC endpoint.
    pub fn new(
        rpc_url: &str,
        signer: impl TransactionSigner + 'static,
    ) -> Result<Self, SdkError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| SdkError::InvalidRpcUrl(e.to_string()))?;

        Ok(Self {
            url,
            http: reqwest::Client::new(),
            signer: Box::new(signer),
            confirm_attempts: DEFAULT_CONFIRM_ATTEMPTS,
            confirm_interval: DEFAULT_CONFIRM_INTERVAL,
            next_id: AtomicU64::new(1),
        })
    }

    /// Create a client for a network's public endpoint.
    pub fn for_network(
        network: Network,
        signer: impl TransactionSigner + 'static,
    ) -> Result<Self, SdkError> {
        Self::new(network.config().rpc_url, signer)
    }

    /// Override how long [`ZilliqaProvider::call`] waits for a receipt.
    pub fn with_confirmation_polling(mut self, attempts: u32, interval: Duration) -> Self {
        self.confirm_attempts = attempts;
        self.confirm_interval = interval;
        self
    }

    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Send one JSON-RPC request and decode the envelope.
    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<RpcResponse<T>, SdkError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "id": id.to_string(),
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| SdkError::Transport(format!("{method}: {e}")))?
            .error_for_status()
            .map_err(|e| SdkError::Transport(format!("{method}: {e}")))?;

        response
            .json::<RpcResponse<T>>()
            .await
            .map_err(|e| SdkError::Decode(format!("{method}: {e}")))
    }

    /// Query that treats an RPC error object as "no result".
    async fn query<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<Option<T>, SdkError> {
        let response = self.request::<T>(method, params).await?;
        if let Some(error) = response.error {
            tracing::debug!(
                method = %method,
                code = error.code,
                message = %error.message,
                "RPC query returned no result"
            );
        }
        Ok(response.result)
    }

    /// Submit a signed transaction and return its id.
    pub async fn create_transaction(&self, tx: &SignedTransaction) -> Result<String, SdkError> {
        let response = self
            .request::<CreateTransactionResult>("CreateTransaction", json!([tx]))
            .await?;

        if let Some(error) = response.error {
            return Err(SdkError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = response
            .result
            .ok_or_else(|| SdkError::Decode("CreateTransaction: missing result".to_string()))?;
        tracing::debug!(tran_id = %result.tran_id, info = %result.info, "Transaction created");
        Ok(result.tran_id)
    }

    /// Fetch a transaction receipt, `None` while it is still pending.
    pub async fn get_transaction(&self, tran_id: &str) -> Result<Option<TxReceipt>, SdkError> {
        let tx = self
            .query::<ConfirmedTransaction>("GetTransaction", json!([tran_id]))
            .await?;
        Ok(tx.map(ConfirmedTransaction::into_receipt))
    }

    /// Poll `GetTransaction` until the receipt shows up.
    async fn wait_for_receipt(&self, tran_id: &str) -> Result<TxReceipt, SdkError> {
        for attempt in 1..=self.confirm_attempts {
            if let Some(receipt) = self.get_transaction(tran_id).await? {
                return Ok(receipt);
            }
            tracing::trace!(tran_id = %tran_id, attempt, "Transaction not confirmed yet");
            if attempt < self.confirm_attempts {
                tokio::time::sleep(self.confirm_interval).await;
            }
        }

        Err(SdkError::NotConfirmed {
            tran_id: tran_id.to_string(),
            attempts: self.confirm_attempts,
        })
    }
}

impl ZilliqaProvider for ZilliqaClient {
    async fn get_balance(&self, address: &Address) -> Result<Option<AccountBalance>, SdkError> {
        self.query("GetBalance", json!([address.to_hex()])).await
    }

    async fn get_minimum_gas_price(&self) -> Result<Option<String>, SdkError> {
        self.query("GetMinimumGasPrice", json!([""])).await
    }

    async fn get_sub_state(
        &self,
        contract: &Address,
        field: &str,
        indices: &[String],
    ) -> Result<Option<Value>, SdkError> {
        let state: Option<Value> = self
            .query(
                "GetSmartContractSubState",
                json!([contract.to_hex(), field, indices]),
            )
            .await?;
        Ok(state.filter(|s| !s.is_null()))
    }

    async fn call(
        &self,
        account: &Account,
        contract: &Address,
        call: &ContractCall,
        params: &TxParams,
    ) -> Result<TxReceipt, SdkError> {
        let sender = account.address();
        let nonce = self
            .get_balance(&sender)
            .await?
            .map(|b| b.nonce + 1)
            .ok_or(SdkError::MissingNonce(sender))?;

        let payload = TxPayload::for_call(account, contract, call, params, nonce);
        let signature = self.signer.sign(account, &payload)?;
        let tran_id = self
            .create_transaction(&SignedTransaction { payload, signature })
            .await?;

        self.wait_for_receipt(&tran_id).await
    }
}
