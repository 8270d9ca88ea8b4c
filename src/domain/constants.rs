// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use alloy::primitives::{Address, address};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Conventional sentinel for the chain's native currency in token slots.
pub const NATIVE_TOKEN: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Canonical ERC-4337 v0.7 entry point.
pub const ENTRY_POINT_V07: Address = address!("0000000071727De22E5E9d8BAf0edAc6f37da032");

// =============================================================================
// NETWORK CONSTANTS
// =============================================================================

pub const CHAIN_ETHEREUM: u64 = 1;
pub const CHAIN_OPTIMISM: u64 = 10;
pub const CHAIN_BSC: u64 = 56;
pub const CHAIN_POLYGON: u64 = 137;
pub const CHAIN_BASE: u64 = 8453;
pub const CHAIN_ARBITRUM: u64 = 42161;

lazy_static! {
    static ref CHAIN_NAMES: HashMap<u64, &'static str> = {
        let mut m = HashMap::new();
        m.insert(CHAIN_ETHEREUM, "ethereum");
        m.insert(CHAIN_OPTIMISM, "optimism");
        m.insert(CHAIN_BSC, "bsc");
        m.insert(CHAIN_POLYGON, "polygon");
        m.insert(CHAIN_BASE, "base");
        m.insert(CHAIN_ARBITRUM, "arbitrum");
        m
    };
}

/// Human name for a chain id, for logs when the config leaves it unset.
pub fn chain_name(chain_id: u64) -> String {
    CHAIN_NAMES
        .get(&chain_id)
        .map(|s| (*s).to_string())
        .unwrap_or_else(|| format!("chain-{chain_id}"))
}

// =============================================================================
// GAS & FEE CONSTANTS
// =============================================================================

/// Fee escalation ratio applied to bundler fee fields (3/2 = 1.5x).
pub const FEE_ESCALATION_NUM: u128 = 3;
pub const FEE_ESCALATION_DEN: u128 = 2;

/// Conservative floors used when no fee estimate is available.
pub const FALLBACK_MAX_PRIORITY_FEE_PER_GAS: u128 = 1_500_000_000; // 1.5 gwei
pub const FALLBACK_MAX_FEE_PER_GAS: u128 = 30_000_000_000; // 30 gwei

// =============================================================================
// RECEIPT POLLING
// =============================================================================

pub const DEFAULT_RECEIPT_POLL_MS: u64 = 500;
pub const DEFAULT_RECEIPT_TIMEOUT_MS: u64 = 60_000;

/// Default slippage tolerance, in whole percent.
pub const DEFAULT_SLIPPAGE_PERCENT: u8 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_names_resolve() {
        assert_eq!(chain_name(CHAIN_ETHEREUM), "ethereum");
        assert_eq!(chain_name(999_999), "chain-999999");
    }

    #[test]
    fn native_sentinel_is_well_known() {
        assert_eq!(
            format!("{NATIVE_TOKEN:#x}"),
            "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"
        );
    }
}
