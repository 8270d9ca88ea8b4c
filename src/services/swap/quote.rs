// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::units;
use crate::domain::error::AppError;
use alloy::primitives::U256;

/// Slippage-bounded output floor for one swap. `min_output` is denominated
/// in the output token's smallest unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub raw_output: String,
    pub min_output: U256,
}

impl Quote {
    /// `floor(raw_output * (100 - slippage_percent) / 100)`, evaluated at
    /// smallest-unit scale in one integer division so nothing is rounded
    /// before the final truncation.
    pub fn compute(
        raw_output: &str,
        slippage_percent: u8,
        out_decimals: u8,
    ) -> Result<Self, AppError> {
        if slippage_percent > 100 {
            return Err(AppError::Validation {
                field: "slippage_percent".to_string(),
                message: format!("must be within 0..=100, got {slippage_percent}"),
            });
        }
        if out_decimals as u32 > units::MAX_DECIMAL_EXP {
            return Err(AppError::Validation {
                field: "out_decimals".to_string(),
                message: format!("unsupported token precision: {out_decimals}"),
            });
        }
        let (mantissa, frac_len) = units::split_decimal(raw_output, "raw_output")?;

        // min = mantissa * (100 - s) * 10^decimals / (100 * 10^frac)
        let keep = U256::from(100u64 - slippage_percent as u64);
        let numerator = mantissa
            .checked_mul(keep)
            .and_then(|v| v.checked_mul(units::pow10(out_decimals as u32)))
            .ok_or_else(|| AppError::Validation {
                field: "raw_output".to_string(),
                message: format!("output overflows 256 bits: {raw_output:?}"),
            })?;
        let denominator = U256::from(100u64)
            .checked_mul(units::pow10(frac_len))
            .ok_or_else(|| AppError::Validation {
                field: "raw_output".to_string(),
                message: format!("output carries too many decimal places: {raw_output:?}"),
            })?;

        Ok(Self {
            raw_output: raw_output.trim().to_string(),
            min_output: numerator / denominator,
        })
    }
}
