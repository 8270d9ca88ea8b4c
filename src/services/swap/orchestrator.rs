// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::error::AppError;
use crate::services::swap::allowance::AllowanceGuard;
use crate::services::swap::builder::{OperationBuilder, SwapParams};
use crate::services::swap::quote::Quote;
use crate::services::swap::routes::RouteSource;
use crate::services::swap::submitter::{OperationSubmitter, Receipt};
use std::fmt;
use std::sync::Arc;

/// Pipeline states. Each state's entry precondition is the previous state's
/// postcondition, which is what makes approval-before-swap structural
/// rather than incidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStage {
    ResolvingRoute,
    QuotingAmount,
    BuildingSwap,
    CheckingAllowance,
    ApprovingAllowance,
    SubmittingSwap,
    Confirmed,
}

impl fmt::Display for SwapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwapStage::ResolvingRoute => "resolving_route",
            SwapStage::QuotingAmount => "quoting_amount",
            SwapStage::BuildingSwap => "building_swap",
            SwapStage::CheckingAllowance => "checking_allowance",
            SwapStage::ApprovingAllowance => "approving_allowance",
            SwapStage::SubmittingSwap => "submitting_swap",
            SwapStage::Confirmed => "confirmed",
        };
        f.write_str(name)
    }
}

/// Terminal result of one pipeline run. `NoRoute` is a success exit with
/// zero on-chain side effects.
#[derive(Debug)]
pub enum SwapOutcome {
    NoRoute,
    Confirmed {
        approval: Option<Receipt>,
        swap: Receipt,
    },
}

/// Runs the swap pipeline exactly once per process invocation. Holds no
/// state across runs.
pub struct SwapOrchestrator<R: RouteSource> {
    route_source: R,
    builder: OperationBuilder,
    allowance: AllowanceGuard,
    submitter: Arc<OperationSubmitter>,
    params: SwapParams,
    slippage_percent: u8,
}

fn enter(stage: SwapStage) {
    tracing::info!(target: "swap", stage = %stage, "Stage entered");
}

impl<R: RouteSource> SwapOrchestrator<R> {
    pub fn new(
        route_source: R,
        builder: OperationBuilder,
        allowance: AllowanceGuard,
        submitter: Arc<OperationSubmitter>,
        params: SwapParams,
        slippage_percent: u8,
    ) -> Self {
        Self {
            route_source,
            builder,
            allowance,
            submitter,
            params,
            slippage_percent,
        }
    }

    pub async fn execute(&self) -> Result<SwapOutcome, AppError> {
        enter(SwapStage::ResolvingRoute);
        let route_quote = self
            .route_source
            .resolve(
                self.params.token_in.address,
                self.params.token_out.address,
                &self.params.amount_in,
            )
            .await?;
        if route_quote.route.is_empty()
            || crate::common::units::decimal_is_zero(&route_quote.output, "output")?
        {
            tracing::info!(target: "swap", "No route found");
            return Ok(SwapOutcome::NoRoute);
        }
        tracing::info!(
            target: "swap",
            hops = route_quote.route.len(),
            output = %route_quote.output,
            "Route resolved"
        );

        enter(SwapStage::QuotingAmount);
        let quote = Quote::compute(
            &route_quote.output,
            self.slippage_percent,
            self.params.token_out.decimals,
        )?;
        tracing::info!(
            target: "swap",
            min_output = %quote.min_output,
            slippage_percent = self.slippage_percent,
            "Minimum output fixed"
        );

        enter(SwapStage::BuildingSwap);
        let swap_op = self
            .builder
            .build_swap(&self.params, &route_quote.route, &quote)
            .await;

        // Native input has no allowance concept; the stage is skipped whole.
        let approval = if self.params.token_in.is_native() {
            None
        } else {
            enter(SwapStage::CheckingAllowance);
            let approval = self
                .allowance
                .check_and_approve(
                    self.params.token_in.address,
                    self.submitter.account_address(),
                    self.builder.router(),
                    self.params.amount_in_units,
                )
                .await?;
            if approval.is_some() {
                // The guard has already blocked until inclusion.
                tracing::info!(
                    target: "swap",
                    stage = %SwapStage::ApprovingAllowance,
                    "Approval finalized ahead of swap submission"
                );
            }
            approval
        };

        enter(SwapStage::SubmittingSwap);
        let swap = self.submitter.submit(&swap_op).await?;
        if !swap.success {
            return Err(AppError::Submission(format!(
                "Swap reverted in {:#x}",
                swap.tx_hash
            )));
        }

        enter(SwapStage::Confirmed);
        Ok(SwapOutcome::Confirmed { approval, swap })
    }
}
