// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::units;
use crate::domain::constants;
use crate::domain::error::AppError;
use alloy::primitives::Address;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct GlobalSettings {
    // General
    #[serde(default = "default_debug")]
    pub debug: bool,
    #[serde(default = "default_false")]
    pub log_json: bool,

    // Chain identity
    pub chain_id: u64,
    pub chain_name: Option<String>,
    #[serde(default = "default_native_symbol")]
    pub native_symbol: String,
    #[serde(default = "default_native_decimals")]
    pub native_decimals: u8,

    // Endpoints
    pub rpc_url: String,
    pub bundler_url: String,
    pub routing_url: String,

    // Contracts
    pub router_address: Address,
    #[serde(default = "default_entry_point")]
    pub entry_point: Address,

    // Smart account
    pub account_address: Address,
    pub signer_key: String,

    // Swap intent
    pub token_in: Address,
    pub token_in_decimals: u8,
    pub token_out: Address,
    pub token_out_decimals: u8,
    /// Input amount in human units, e.g. "0.0001".
    pub amount_in: String,
    #[serde(default = "default_slippage_percent")]
    pub slippage_percent: u8,

    // Confirmation polling
    #[serde(default = "default_receipt_poll_ms")]
    pub receipt_poll_ms: u64,
    #[serde(default = "default_receipt_timeout_ms")]
    pub receipt_timeout_ms: u64,
}

// Defaults
fn default_debug() -> bool {
    false
}
fn default_false() -> bool {
    false
}
fn default_native_symbol() -> String {
    "ETH".to_string()
}
fn default_native_decimals() -> u8 {
    18
}
fn default_entry_point() -> Address {
    constants::ENTRY_POINT_V07
}
fn default_slippage_percent() -> u8 {
    constants::DEFAULT_SLIPPAGE_PERCENT
}
fn default_receipt_poll_ms() -> u64 {
    constants::DEFAULT_RECEIPT_POLL_MS
}
fn default_receipt_timeout_ms() -> u64 {
    constants::DEFAULT_RECEIPT_TIMEOUT_MS
}

impl GlobalSettings {
    pub fn load_with_path(path: Option<&str>) -> Result<Self, AppError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let mut builder = Config::builder();
        if let Some(selected_path) = path {
            builder = builder.add_source(File::from(Path::new(selected_path)).required(true));
        } else {
            builder = builder.add_source(File::with_name("config").required(false));
        }
        // Deterministic precedence: CLI (in main) > env/.env > config file.
        builder = builder.add_source(Environment::default());

        let settings: GlobalSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load() -> Result<Self, AppError> {
        Self::load_with_path(None)
    }

    fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("rpc_url", &self.rpc_url),
            ("bundler_url", &self.bundler_url),
            ("routing_url", &self.routing_url),
        ] {
            Url::parse(value)
                .map_err(|e| AppError::Config(format!("Invalid {field} {value:?}: {e}")))?;
        }
        if self.signer_key.trim().is_empty() {
            return Err(AppError::Config("SIGNER_KEY is missing".to_string()));
        }
        if self.slippage_percent > 100 {
            return Err(AppError::Config(format!(
                "slippage_percent must be within 0..=100, got {}",
                self.slippage_percent
            )));
        }
        // The amount must be expressible in the input token's precision.
        let amount = units::parse_units(&self.amount_in, self.token_in_decimals, "amount_in")
            .map_err(|e| AppError::Config(e.to_string()))?;
        if amount.is_zero() {
            return Err(AppError::Config("amount_in must be positive".to_string()));
        }
        if self.token_in == self.token_out {
            return Err(AppError::Config(
                "token_in and token_out must differ".to_string(),
            ));
        }
        if self.receipt_poll_ms == 0 || self.receipt_timeout_ms == 0 {
            return Err(AppError::Config(
                "receipt_poll_ms and receipt_timeout_ms must be nonzero".to_string(),
            ));
        }
        Ok(())
    }

    /// Chain name from config, or the built-in table for known ids.
    pub fn chain_name_value(&self) -> String {
        self.chain_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| constants::chain_name(self.chain_id))
    }
}
