// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use alloy::providers::Provider;
use alloy::signers::local::PrivateKeySigner;
use bookswap::app::config::GlobalSettings;
use bookswap::app::logging::setup_logging;
use bookswap::common::units;
use bookswap::domain::error::AppError;
use bookswap::infrastructure::network::bundler::BundlerClient;
use bookswap::infrastructure::network::gas::GasOracle;
use bookswap::infrastructure::network::provider::ConnectionFactory;
use bookswap::infrastructure::network::routing::RoutingClient;
use bookswap::services::account::SmartAccount;
use bookswap::services::swap::allowance::AllowanceGuard;
use bookswap::services::swap::builder::{OperationBuilder, SwapParams};
use bookswap::services::swap::orchestrator::{SwapOrchestrator, SwapOutcome};
use bookswap::services::swap::routes::Token;
use bookswap::services::swap::submitter::OperationSubmitter;
use clap::Parser;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "gasless orderbook swap")]
struct Cli {
    /// Path to config file (default: config.{toml,yaml,...})
    #[arg(long)]
    config: Option<String>,

    /// Slippage tolerance in whole percent, overriding the config
    #[arg(long)]
    slippage_percent: Option<u8>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let settings = GlobalSettings::load_with_path(cli.config.as_deref())?;
    setup_logging(
        if settings.debug { "debug" } else { "info" },
        settings.log_json,
    );

    let slippage_percent = cli.slippage_percent.unwrap_or(settings.slippage_percent);
    if slippage_percent > 100 {
        return Err(AppError::Config(format!(
            "slippage_percent must be within 0..=100, got {slippage_percent}"
        )));
    }

    let signer = PrivateKeySigner::from_str(&settings.signer_key)
        .map_err(|e| AppError::Config(format!("Invalid signer key: {}", e)))?;

    let provider = ConnectionFactory::http(&settings.rpc_url)?;
    let rpc_chain_id: u64 = provider
        .get_chain_id()
        .await
        .map_err(|e| AppError::Connection(format!("chain_id fetch failed: {e}")))?;
    if rpc_chain_id != settings.chain_id {
        return Err(AppError::Config(format!(
            "RPC chain id {rpc_chain_id} does not match configured chain id {}",
            settings.chain_id
        )));
    }
    tracing::info!(
        target: "config",
        chain = %settings.chain_name_value(),
        chain_id = settings.chain_id,
        native = %settings.native_symbol,
        "Connected"
    );

    let account = SmartAccount::new(
        signer,
        settings.account_address,
        settings.entry_point,
        settings.chain_id,
        provider.clone(),
    );
    tracing::info!(
        target: "account",
        address = %format!("{:#x}", account.address()),
        entry_point = %format!("{:#x}", account.entry_point()),
        "Smart account ready"
    );

    let routing = RoutingClient::new(&settings.routing_url)?;
    let bundler = BundlerClient::new(&settings.bundler_url, settings.entry_point)?;
    let builder = OperationBuilder::new(settings.router_address, GasOracle::new(provider.clone()));
    let submitter = Arc::new(OperationSubmitter::new(
        account,
        bundler,
        Duration::from_millis(settings.receipt_poll_ms),
        Duration::from_millis(settings.receipt_timeout_ms),
    ));
    let allowance = AllowanceGuard::new(provider, builder.clone(), submitter.clone());

    let token_in = Token::new(settings.token_in, settings.token_in_decimals);
    let token_out = Token::new(settings.token_out, settings.token_out_decimals);
    let amount_in_units =
        units::parse_units(&settings.amount_in, token_in.decimals, "amount_in")?;
    let params = SwapParams {
        token_in,
        token_out,
        amount_in: settings.amount_in.clone(),
        amount_in_units,
    };
    tracing::info!(
        target: "swap",
        token_in = %format!("{:#x}", token_in.address),
        token_out = %format!("{:#x}", token_out.address),
        amount_in = %settings.amount_in,
        slippage_percent,
        "Executing swap intent"
    );

    let orchestrator = SwapOrchestrator::new(
        routing,
        builder,
        allowance,
        submitter,
        params,
        slippage_percent,
    );

    match orchestrator.execute().await? {
        SwapOutcome::NoRoute => {
            // Clean exit: nothing was submitted, nothing to report.
            Ok(())
        }
        SwapOutcome::Confirmed { approval, swap } => {
            if let Some(approval) = approval {
                tracing::info!(
                    target: "swap",
                    approval_tx = %format!("{:#x}", approval.tx_hash),
                    "Approval included"
                );
            }
            tracing::info!(
                target: "swap",
                tx_hash = %format!("{:#x}", swap.tx_hash),
                "Swap confirmed"
            );
            Ok(())
        }
    }
}
