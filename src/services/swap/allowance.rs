// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::domain::error::AppError;
use crate::infrastructure::data::router_abi::IERC20;
use crate::infrastructure::network::provider::HttpProvider;
use crate::services::swap::builder::OperationBuilder;
use crate::services::swap::submitter::{OperationSubmitter, Receipt};
use alloy::primitives::{Address, U256};
use std::sync::Arc;

/// Ensures the router may pull the input token before the swap is sent.
/// The allowance is read fresh on every invocation; a stale read risks both
/// failed swaps and over-approval.
pub struct AllowanceGuard {
    provider: HttpProvider,
    builder: OperationBuilder,
    submitter: Arc<OperationSubmitter>,
}

/// A fresh approval is needed only when the live allowance falls short.
pub fn needs_approval(current: U256, required: U256) -> bool {
    current < required
}

impl AllowanceGuard {
    pub fn new(
        provider: HttpProvider,
        builder: OperationBuilder,
        submitter: Arc<OperationSubmitter>,
    ) -> Self {
        Self {
            provider,
            builder,
            submitter,
        }
    }

    /// Returns the confirmed approval receipt, or `None` when the standing
    /// allowance already covers the requirement. Blocks until the approval
    /// is on-chain: the swap must never race its own prerequisite through
    /// the bundler.
    pub async fn check_and_approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        required: U256,
    ) -> Result<Option<Receipt>, AppError> {
        let current = IERC20::new(token, self.provider.clone())
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| AppError::Connection(format!("Allowance read failed: {e}")))?;

        if !needs_approval(current, required) {
            tracing::info!(
                target: "allowance",
                %token,
                current = %current,
                required = %required,
                "Allowance sufficient, skipping approval"
            );
            return Ok(None);
        }

        tracing::info!(
            target: "allowance",
            %token,
            current = %current,
            required = %required,
            "Granting exact-amount approval"
        );
        let op = self.builder.build_approval(token, spender, required).await;
        let receipt = self
            .submitter
            .submit(&op)
            .await
            .map_err(|e| AppError::Approval(e.to_string()))?;
        if !receipt.success {
            return Err(AppError::Approval(format!(
                "Approval reverted in {:#x}",
                receipt.tx_hash
            )));
        }
        tracing::info!(
            target: "allowance",
            tx_hash = %format!("{:#x}", receipt.tx_hash),
            "Approval confirmed"
        );
        Ok(Some(receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_allowance_needs_no_approval() {
        let required = U256::from(1_000u64);
        assert!(!needs_approval(required, required));
    }

    #[test]
    fn shortfall_needs_approval() {
        assert!(needs_approval(U256::from(999u64), U256::from(1_000u64)));
    }

    #[test]
    fn surplus_needs_no_approval() {
        assert!(!needs_approval(U256::from(1_001u64), U256::from(1_000u64)));
        assert!(!needs_approval(U256::MAX, U256::from(1u64)));
    }

    #[test]
    fn zero_required_never_approves() {
        assert!(!needs_approval(U256::ZERO, U256::ZERO));
    }
}
