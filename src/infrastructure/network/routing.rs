// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::error::AppError;
use crate::services::swap::routes::{Pool, Route, RouteQuote, RouteSource};
use alloy::primitives::Address;
use serde::Deserialize;
use serde_json::json;
use url::Url;

/// HTTP client for the external routing oracle. Path-finding internals are
/// entirely the service's business; this client only ships questions over
/// and zips the answer into a `Route`.
///
/// Amounts cross this wire as decimal strings so 18-decimal outputs survive
/// the trip intact.
#[derive(Clone)]
pub struct RoutingClient {
    base_url: Url,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BestPathResponse {
    output: String,
    route: Vec<Address>,
    is_buy: Vec<bool>,
    native_send: Vec<bool>,
}

impl RoutingClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid routing URL: {}", e)))?;
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::Routing(format!("Bad routing endpoint {path:?}: {e}")))
    }

    pub async fn get_all_pools(
        &self,
        token_in: Address,
        token_out: Address,
    ) -> Result<Vec<Pool>, AppError> {
        let payload = json!({
            "tokenIn": format!("{token_in:#x}"),
            "tokenOut": format!("{token_out:#x}"),
        });
        let resp = self
            .client
            .post(self.endpoint("pools")?)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Connection(format!("Routing pools request failed: {e}")))?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(AppError::Routing(format!(
                "Routing pools request rejected: {status} body={body}"
            )));
        }
        serde_json::from_str(&body)
            .map_err(|e| AppError::Routing(format!("Routing pools decode failed: {e}")))
    }

    pub async fn find_best_path(
        &self,
        token_in: Address,
        token_out: Address,
        amount_in: &str,
        pools: &[Pool],
    ) -> Result<RouteQuote, AppError> {
        let payload = json!({
            "tokenIn": format!("{token_in:#x}"),
            "tokenOut": format!("{token_out:#x}"),
            "amountIn": amount_in,
            "direction": "amountIn",
            "pools": pools,
        });
        let resp = self
            .client
            .post(self.endpoint("path")?)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Connection(format!("Routing path request failed: {e}")))?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(AppError::Routing(format!(
                "Routing path request rejected: {status} body={body}"
            )));
        }
        let parsed: BestPathResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::Routing(format!("Routing path decode failed: {e}")))?;

        let route = Route::try_new(parsed.route, parsed.is_buy, parsed.native_send)?;
        Ok(RouteQuote {
            output: parsed.output,
            route,
        })
    }
}

impl RouteSource for RoutingClient {
    async fn resolve(
        &self,
        token_in: Address,
        token_out: Address,
        amount_in: &str,
    ) -> Result<RouteQuote, AppError> {
        let pools = self.get_all_pools(token_in, token_out).await?;
        if pools.is_empty() {
            tracing::debug!(target: "routing", %token_in, %token_out, "No pools connect the pair");
            return Ok(RouteQuote::no_route());
        }
        tracing::debug!(target: "routing", pools = pools.len(), "Requesting best path");
        self.find_best_path(token_in, token_out, amount_in, &pools)
            .await
    }
}
