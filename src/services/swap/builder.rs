// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::constants::{FEE_ESCALATION_DEN, FEE_ESCALATION_NUM};
use crate::infrastructure::data::router_abi::{IERC20, MarketRouter};
use crate::infrastructure::network::gas::GasOracle;
use crate::services::swap::quote::Quote;
use crate::services::swap::routes::{Route, Token};
use alloy::primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;

/// One on-chain action expressed as a not-yet-signed meta-transaction.
/// `target` is the contract the smart account will call; `value` is the
/// native currency attached to that inner call. Fee fields are `None` when
/// no estimate was available, deferring to the execution context defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOperation {
    pub target: Address,
    pub call_data: Bytes,
    pub value: U256,
    pub max_priority_fee_per_gas: Option<u128>,
    pub max_fee_per_gas: Option<u128>,
}

/// The fixed swap intent, with the input amount already resolved to the
/// input token's smallest unit.
#[derive(Debug, Clone)]
pub struct SwapParams {
    pub token_in: Token,
    pub token_out: Token,
    /// Human-units input, as handed to the routing oracle.
    pub amount_in: String,
    /// The same amount in token-in smallest units.
    pub amount_in_units: U256,
}

/// Assembles swap and approval operations. Pure construction: nothing here
/// touches the chain except the fee estimate lookup.
#[derive(Clone)]
pub struct OperationBuilder {
    router: Address,
    gas: GasOracle,
}

impl OperationBuilder {
    pub fn new(router: Address, gas: GasOracle) -> Self {
        Self { router, gas }
    }

    pub fn router(&self) -> Address {
        self.router
    }

    /// The swap operation: router calldata over the whole route, native
    /// value attached only when the first hop is natively funded.
    pub async fn build_swap(&self, params: &SwapParams, route: &Route, quote: &Quote) -> UserOperation {
        let call_data = MarketRouter::anyToAnySwapCall {
            marketAddresses: route.markets(),
            isBuy: route.buy_flags(),
            nativeSend: route.native_send_flags(),
            debitToken: params.token_in.address,
            creditToken: params.token_out.address,
            amount: params.amount_in_units,
            minAmountOut: quote.min_output,
        }
        .abi_encode();

        let value = if route.first_hop_native() {
            params.amount_in_units
        } else {
            U256::ZERO
        };

        let (max_priority_fee_per_gas, max_fee_per_gas) = self.escalated_fees().await;

        UserOperation {
            target: self.router,
            call_data: call_data.into(),
            value,
            max_priority_fee_per_gas,
            max_fee_per_gas,
        }
    }

    /// An exact-amount approval granting `spender` rights over `token`.
    pub async fn build_approval(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> UserOperation {
        let call_data = IERC20::approveCall { spender, amount }.abi_encode();

        let (max_priority_fee_per_gas, max_fee_per_gas) = self.escalated_fees().await;

        UserOperation {
            target: token,
            call_data: call_data.into(),
            value: U256::ZERO,
            max_priority_fee_per_gas,
            max_fee_per_gas,
        }
    }

    /// Escalated fee pair, or (None, None) when no estimate is available.
    async fn escalated_fees(&self) -> (Option<u128>, Option<u128>) {
        match self.gas.estimate_eip1559_fees().await {
            Ok(fees) => (
                Some(escalate_fee(fees.max_priority_fee_per_gas)),
                Some(escalate_fee(fees.max_fee_per_gas)),
            ),
            Err(e) => {
                tracing::debug!(target: "builder", error = %e, "No fee estimate, deferring to defaults");
                (None, None)
            }
        }
    }
}

/// Integer-ratio escalation; floats never touch fee math.
pub fn escalate_fee(fee: u128) -> u128 {
    fee.saturating_mul(FEE_ESCALATION_NUM) / FEE_ESCALATION_DEN
}
