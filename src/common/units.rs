// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::error::AppError;
use alloy::primitives::U256;

/// Largest exponent 10^exp can take without leaving 256 bits.
pub const MAX_DECIMAL_EXP: u32 = 77;

/// 10^exp as U256. Callers bound `exp` by [`MAX_DECIMAL_EXP`].
pub fn pow10(exp: u32) -> U256 {
    U256::from(10u64).pow(U256::from(exp.min(MAX_DECIMAL_EXP)))
}

/// Split a non-negative decimal string into (mantissa, fractional digits).
/// "1.25" -> (125, 2), "100" -> (100, 0), ".5" -> (5, 1).
pub fn split_decimal(s: &str, field: &str) -> Result<(U256, u32), AppError> {
    let trimmed = s.trim();
    let invalid = |message: &str| AppError::Validation {
        field: field.to_string(),
        message: format!("{message}: {trimmed:?}"),
    };

    if trimmed.is_empty() {
        return Err(invalid("empty decimal"));
    }
    let mut parts = trimmed.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next().unwrap_or("");
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid("no digits"));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid("not a non-negative decimal"));
    }
    // 10^78 already exceeds 2^256; bound the exponent before pow10 sees it.
    if frac_part.len() > MAX_DECIMAL_EXP as usize {
        return Err(invalid("too many decimal places"));
    }

    let mut digits = String::with_capacity(int_part.len() + frac_part.len());
    digits.push_str(int_part);
    digits.push_str(frac_part);
    let mantissa = if digits.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(&digits, 10).map_err(|_| invalid("value out of range"))?
    };

    Ok((mantissa, frac_part.len() as u32))
}

/// Convert a decimal amount into the token's smallest unit, exactly.
/// Rejects amounts carrying more precision than the token supports.
pub fn parse_units(s: &str, decimals: u8, field: &str) -> Result<U256, AppError> {
    let (mantissa, frac_len) = split_decimal(s, field)?;
    let decimals = decimals as u32;
    if decimals > MAX_DECIMAL_EXP {
        return Err(AppError::Validation {
            field: field.to_string(),
            message: format!("unsupported token precision: {decimals}"),
        });
    }
    if frac_len > decimals {
        // Excess digits are fine only when they are all zero.
        let excess = frac_len - decimals;
        if !(mantissa % pow10(excess)).is_zero() {
            return Err(AppError::Validation {
                field: field.to_string(),
                message: format!("more than {decimals} decimal places: {s:?}"),
            });
        }
        return Ok(mantissa / pow10(excess));
    }
    mantissa
        .checked_mul(pow10(decimals - frac_len))
        .ok_or_else(|| AppError::Validation {
            field: field.to_string(),
            message: format!("amount overflows 256 bits: {s:?}"),
        })
}

/// True when the decimal string denotes exactly zero.
pub fn decimal_is_zero(s: &str, field: &str) -> Result<bool, AppError> {
    let (mantissa, _) = split_decimal(s, field)?;
    Ok(mantissa.is_zero())
}
