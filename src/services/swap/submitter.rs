// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::constants::{FALLBACK_MAX_FEE_PER_GAS, FALLBACK_MAX_PRIORITY_FEE_PER_GAS};
use crate::domain::error::AppError;
use crate::infrastructure::network::bundler::BundlerClient;
use crate::services::account::{PackedFields, SmartAccount};
use crate::services::swap::builder::UserOperation;
use alloy::primitives::{Address, B256, U256};
use serde_json::json;
use std::time::Duration;

/// Finalized on-chain outcome of one submitted operation.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub user_op_hash: B256,
    pub tx_hash: B256,
    pub success: bool,
}

/// Signs, sends and confirms user operations. Blocking from the caller's
/// perspective: `submit` only returns once the bundler reports inclusion.
pub struct OperationSubmitter {
    account: SmartAccount,
    bundler: BundlerClient,
    poll: Duration,
    timeout: Duration,
}

impl OperationSubmitter {
    pub fn new(
        account: SmartAccount,
        bundler: BundlerClient,
        poll: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            account,
            bundler,
            poll,
            timeout,
        }
    }

    pub fn account_address(&self) -> Address {
        self.account.address()
    }

    pub async fn submit(&self, op: &UserOperation) -> Result<Receipt, AppError> {
        let nonce = self.account.nonce().await?;
        let call_data = SmartAccount::execute_calldata(op.target, op.value, &op.call_data);

        let max_priority_fee_per_gas = op
            .max_priority_fee_per_gas
            .unwrap_or(FALLBACK_MAX_PRIORITY_FEE_PER_GAS);
        let max_fee_per_gas = op.max_fee_per_gas.unwrap_or(FALLBACK_MAX_FEE_PER_GAS);

        // Size the operation first; limits feed the signed hash.
        let estimate_wire = user_op_json(
            self.account.address(),
            nonce,
            &call_data,
            0,
            0,
            U256::ZERO,
            max_priority_fee_per_gas,
            max_fee_per_gas,
            &SmartAccount::dummy_signature(),
        );
        let gas = self
            .bundler
            .estimate_user_operation_gas(&estimate_wire)
            .await?;

        let fields = PackedFields {
            sender: self.account.address(),
            nonce,
            call_data: call_data.clone().into(),
            call_gas_limit: gas.call_gas_limit.saturating_to::<u128>(),
            verification_gas_limit: gas.verification_gas_limit.saturating_to::<u128>(),
            pre_verification_gas: gas.pre_verification_gas,
            max_priority_fee_per_gas,
            max_fee_per_gas,
        };
        let hash = self.account.user_op_hash(&fields);
        let signature = self.account.sign_user_op_hash(&hash)?;

        let wire = user_op_json(
            fields.sender,
            fields.nonce,
            &call_data,
            fields.call_gas_limit,
            fields.verification_gas_limit,
            fields.pre_verification_gas,
            fields.max_priority_fee_per_gas,
            fields.max_fee_per_gas,
            &signature,
        );
        let user_op_hash = self.bundler.send_user_operation(&wire).await?;
        tracing::info!(
            target: "submitter",
            user_op_hash = %format!("{user_op_hash:#x}"),
            "User operation accepted, awaiting inclusion"
        );

        let receipt = self
            .bundler
            .wait_for_receipt(user_op_hash, self.poll, self.timeout)
            .await?;
        Ok(Receipt {
            user_op_hash: receipt.user_op_hash,
            tx_hash: receipt.receipt.transaction_hash,
            success: receipt.success,
        })
    }
}

/// v0.7 wire form of a deployed account's operation (no factory, no
/// paymaster), quantities hex-encoded the way bundlers expect.
#[allow(clippy::too_many_arguments)]
fn user_op_json(
    sender: Address,
    nonce: U256,
    call_data: &[u8],
    call_gas_limit: u128,
    verification_gas_limit: u128,
    pre_verification_gas: U256,
    max_priority_fee_per_gas: u128,
    max_fee_per_gas: u128,
    signature: &[u8],
) -> serde_json::Value {
    json!({
        "sender": format!("{sender:#x}"),
        "nonce": format!("{nonce:#x}"),
        "callData": format!("0x{}", hex::encode(call_data)),
        "callGasLimit": format!("{call_gas_limit:#x}"),
        "verificationGasLimit": format!("{verification_gas_limit:#x}"),
        "preVerificationGas": format!("{pre_verification_gas:#x}"),
        "maxPriorityFeePerGas": format!("{max_priority_fee_per_gas:#x}"),
        "maxFeePerGas": format!("{max_fee_per_gas:#x}"),
        "signature": format!("0x{}", hex::encode(signature)),
    })
}
