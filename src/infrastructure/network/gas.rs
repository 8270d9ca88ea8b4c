// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::error::AppError;
use crate::infrastructure::network::provider::HttpProvider;
use alloy::providers::Provider;
use alloy::rpc::types::BlockNumberOrTag;
use alloy::rpc::types::eth::FeeHistory;

#[derive(Clone)]
pub struct GasOracle {
    provider: HttpProvider,
}

#[derive(Debug, Clone)]
pub struct GasFees {
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
}

impl GasOracle {
    pub fn new(provider: HttpProvider) -> Self {
        Self { provider }
    }

    /// Best-effort EIP-1559 estimate. Callers treat an `Err` as "no estimate
    /// available" and fall back to the execution context's defaults.
    pub async fn estimate_eip1559_fees(&self) -> Result<GasFees, AppError> {
        match self
            .provider
            .get_fee_history(5, BlockNumberOrTag::Latest, &[50.0f64])
            .await
        {
            Ok(history) => Self::fees_from_history(&history),
            Err(_) => self.fallback_estimate().await,
        }
    }

    fn fees_from_history(history: &FeeHistory) -> Result<GasFees, AppError> {
        let latest_base_fee = history
            .latest_block_base_fee()
            .or_else(|| history.base_fee_per_gas.iter().rev().nth(1).copied())
            .ok_or(AppError::Connection("No base fee history".into()))?;

        let raw_next_base = history.next_block_base_fee().unwrap_or(latest_base_fee);

        // 12.5% buffer for nodes that return zeroes in the projection slot.
        let next_base_fee = if raw_next_base == 0 {
            (latest_base_fee.saturating_mul(1125)) / 1000
        } else {
            raw_next_base
        };

        let mut p50_sum = 0u128;
        let mut p50_count = 0u128;
        if let Some(rewards) = &history.reward {
            for block_reward in rewards {
                if let Some(r) = block_reward.first() {
                    p50_sum = p50_sum.saturating_add(*r);
                    p50_count = p50_count.saturating_add(1);
                }
            }
        }
        let avg_p50 = if p50_count > 0 {
            p50_sum / p50_count
        } else {
            2_000_000_000
        };

        Ok(GasFees {
            max_fee_per_gas: next_base_fee.saturating_add(avg_p50),
            max_priority_fee_per_gas: avg_p50,
        })
    }

    // Fallback path for nodes that disable feeHistory (common on some public RPCs).
    async fn fallback_estimate(&self) -> Result<GasFees, AppError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .map_err(|e| AppError::Connection(format!("Latest block fetch failed: {}", e)))?;

        let base: u128 = block
            .as_ref()
            .and_then(|b| b.header.base_fee_per_gas)
            .map(|v| v as u128)
            .ok_or(AppError::Connection("No base fee on latest block".into()))?;

        let priority: u128 = self
            .provider
            .get_max_priority_fee_per_gas()
            .await
            .unwrap_or(2_000_000_000u128); // 2 gwei floor

        let next_base = (base.saturating_mul(1125)) / 1000;

        Ok(GasFees {
            max_fee_per_gas: next_base + priority,
            max_priority_fee_per_gas: priority,
        })
    }
}
