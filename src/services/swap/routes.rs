// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::constants::NATIVE_TOKEN;
use crate::domain::error::AppError;
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// An ERC-20 (or native sentinel) with its decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub address: Address,
    pub decimals: u8,
}

impl Token {
    pub fn new(address: Address, decimals: u8) -> Self {
        Self { address, decimals }
    }

    pub fn is_native(&self) -> bool {
        self.address == NATIVE_TOKEN
    }
}

/// An on-chain market venue, opaque beyond its identity and token pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub address: Address,
    pub base_token: Address,
    pub quote_token: Address,
}

/// One market traversal within a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteHop {
    pub market: Address,
    pub is_buy: bool,
    /// Whether this hop is funded with native currency.
    pub native_send: bool,
}

/// Ordered market path connecting token-in to token-out. Immutable once
/// produced by the resolver; owned by the orchestrator for one swap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    pub hops: Vec<RouteHop>,
}

impl Route {
    /// Builds a route if the per-hop flag arrays line up with the market list.
    pub fn try_new(
        markets: Vec<Address>,
        is_buy: Vec<bool>,
        native_send: Vec<bool>,
    ) -> Result<Self, AppError> {
        if markets.len() != is_buy.len() || markets.len() != native_send.len() {
            return Err(AppError::Routing(format!(
                "Per-hop arrays disagree: {} markets, {} isBuy, {} nativeSend",
                markets.len(),
                is_buy.len(),
                native_send.len()
            )));
        }
        let hops = markets
            .into_iter()
            .zip(is_buy)
            .zip(native_send)
            .map(|((market, is_buy), native_send)| RouteHop {
                market,
                is_buy,
                native_send,
            })
            .collect();
        Ok(Self { hops })
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// True when the first hop is funded with native currency.
    pub fn first_hop_native(&self) -> bool {
        self.hops.first().map(|h| h.native_send).unwrap_or(false)
    }

    pub fn markets(&self) -> Vec<Address> {
        self.hops.iter().map(|h| h.market).collect()
    }

    pub fn buy_flags(&self) -> Vec<bool> {
        self.hops.iter().map(|h| h.is_buy).collect()
    }

    pub fn native_send_flags(&self) -> Vec<bool> {
        self.hops.iter().map(|h| h.native_send).collect()
    }
}

/// Resolver output: the implied total output (decimal, human units) plus the
/// route that produces it. Zero output means "no viable route" and is not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuote {
    pub output: String,
    pub route: Route,
}

impl RouteQuote {
    pub fn no_route() -> Self {
        Self {
            output: "0".to_string(),
            route: Route::default(),
        }
    }
}

/// Injected routing strategy: path-finding is an external concern and this
/// core only consumes its result.
pub trait RouteSource {
    fn resolve(
        &self,
        token_in: Address,
        token_out: Address,
        amount_in: &str,
    ) -> impl Future<Output = Result<RouteQuote, AppError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zips_hop_arrays() {
        let route = Route::try_new(
            vec![Address::from([1u8; 20]), Address::from([2u8; 20])],
            vec![true, false],
            vec![true, false],
        )
        .unwrap();
        assert_eq!(route.len(), 2);
        assert!(route.first_hop_native());
        assert_eq!(route.buy_flags(), vec![true, false]);
    }

    #[test]
    fn rejects_mismatched_arrays() {
        let res = Route::try_new(
            vec![Address::from([1u8; 20])],
            vec![true, false],
            vec![true],
        );
        assert!(res.is_err());
    }

    #[test]
    fn native_token_detection() {
        let native = Token::new(NATIVE_TOKEN, 18);
        let erc20 = Token::new(Address::from([9u8; 20]), 6);
        assert!(native.is_native());
        assert!(!erc20.is_native());
    }

    #[test]
    fn empty_route_has_no_native_first_hop() {
        assert!(!Route::default().first_hop_native());
    }
}
