// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::error::AppError;
use alloy::primitives::{Address, B256, U256};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::{Duration, Instant};
use url::Url;

/// JSON-RPC client for an ERC-4337 bundler endpoint.
#[derive(Clone)]
pub struct BundlerClient {
    url: Url,
    entry_point: Address,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Bundler-estimated gas dimensions for a user operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationGas {
    pub pre_verification_gas: U256,
    pub verification_gas_limit: U256,
    pub call_gas_limit: U256,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationReceipt {
    pub user_op_hash: B256,
    pub success: bool,
    #[serde(default)]
    pub reason: Option<String>,
    pub receipt: IncludedTransaction,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludedTransaction {
    pub transaction_hash: B256,
}

impl BundlerClient {
    pub fn new(url: &str, entry_point: Address) -> Result<Self, AppError> {
        let url =
            Url::parse(url).map_err(|e| AppError::Config(format!("Invalid bundler URL: {}", e)))?;
        Ok(Self {
            url,
            entry_point,
            client: reqwest::Client::new(),
        })
    }

    /// One JSON-RPC round trip. A `null` result is surfaced as `None`; an
    /// `error` member is surfaced as `Submission`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<Option<T>, AppError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let resp = self
            .client
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Connection(format!("Bundler POST failed: {e}")))?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(AppError::Connection(format!(
                "Bundler HTTP {status}: {body}"
            )));
        }
        let envelope: RpcEnvelope<T> = serde_json::from_str(&body)
            .map_err(|e| AppError::Connection(format!("Bundler {method} decode failed: {e}")))?;
        if let Some(err) = envelope.error {
            return Err(AppError::Submission(format!(
                "{method} rejected ({}): {}",
                err.code, err.message
            )));
        }
        Ok(envelope.result)
    }

    /// Ask the bundler to size the operation. The wire form carries a dummy
    /// signature; limits do not depend on a valid one.
    pub async fn estimate_user_operation_gas(
        &self,
        op: &serde_json::Value,
    ) -> Result<UserOperationGas, AppError> {
        self.call(
            "eth_estimateUserOperationGas",
            json!([op, format!("{:#x}", self.entry_point)]),
        )
        .await?
        .ok_or_else(|| AppError::Connection("Gas estimate returned no result".into()))
    }

    pub async fn send_user_operation(&self, op: &serde_json::Value) -> Result<B256, AppError> {
        self.call(
            "eth_sendUserOperation",
            json!([op, format!("{:#x}", self.entry_point)]),
        )
        .await?
        .ok_or_else(|| AppError::Submission("eth_sendUserOperation returned no hash".into()))
    }

    /// `None` while the operation is still pending inclusion.
    pub async fn get_user_operation_receipt(
        &self,
        user_op_hash: B256,
    ) -> Result<Option<UserOperationReceipt>, AppError> {
        self.call(
            "eth_getUserOperationReceipt",
            json!([format!("{user_op_hash:#x}")]),
        )
        .await
    }

    /// Poll until the operation is included or the timeout elapses. The
    /// caller treats a timeout as fatal; there is no retry tier above this.
    pub async fn wait_for_receipt(
        &self,
        user_op_hash: B256,
        poll: Duration,
        timeout: Duration,
    ) -> Result<UserOperationReceipt, AppError> {
        let started = Instant::now();
        loop {
            if let Some(receipt) = self.get_user_operation_receipt(user_op_hash).await? {
                return Ok(receipt);
            }
            if started.elapsed() >= timeout {
                return Err(AppError::ConfirmationTimeout {
                    user_op_hash: format!("{user_op_hash:#x}"),
                    waited_ms: started.elapsed().as_millis() as u64,
                });
            }
            tokio::time::sleep(poll).await;
        }
    }
}
