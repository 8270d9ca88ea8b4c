// Integration-ish test that exercises the swap pipeline's construction path
// end to end without needing a running chain, routing service, or bundler.
// It validates the encoded router calldata, the native value attachment,
// and the orchestrator's clean no-route exit.

use alloy::primitives::{Address, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy_sol_types::SolCall;
use bookswap::common::units;
use bookswap::core::allowance::AllowanceGuard;
use bookswap::core::builder::{OperationBuilder, SwapParams};
use bookswap::core::orchestrator::{SwapOrchestrator, SwapOutcome};
use bookswap::core::quote::Quote;
use bookswap::core::routes::{Route, RouteQuote, RouteSource, Token};
use bookswap::core::submitter::OperationSubmitter;
use bookswap::data::router_abi::MarketRouter;
use bookswap::domain::constants::{ENTRY_POINT_V07, NATIVE_TOKEN};
use bookswap::domain::error::AppError;
use bookswap::infrastructure::network::bundler::BundlerClient;
use bookswap::infrastructure::network::gas::GasOracle;
use bookswap::infrastructure::network::provider::ConnectionFactory;
use bookswap::services::account::SmartAccount;
use std::sync::Arc;
use std::time::Duration;

struct CannedRoutes(RouteQuote);

impl RouteSource for CannedRoutes {
    async fn resolve(
        &self,
        _token_in: Address,
        _token_out: Address,
        _amount_in: &str,
    ) -> Result<RouteQuote, AppError> {
        Ok(self.0.clone())
    }
}

fn offline_stack() -> (OperationBuilder, AllowanceGuard, Arc<OperationSubmitter>) {
    // Minimal wiring; no real RPC is required because construction never
    // dials out (a failed fee estimate just omits the overrides).
    let provider = ConnectionFactory::http("http://127.0.0.1:1").unwrap();
    let router = Address::from([0x77; 20]);
    let builder = OperationBuilder::new(router, GasOracle::new(provider.clone()));
    let account = SmartAccount::new(
        PrivateKeySigner::random(),
        Address::from([0xaa; 20]),
        ENTRY_POINT_V07,
        8453,
        provider.clone(),
    );
    let bundler = BundlerClient::new("http://127.0.0.1:1", ENTRY_POINT_V07).unwrap();
    let submitter = Arc::new(OperationSubmitter::new(
        account,
        bundler,
        Duration::from_millis(10),
        Duration::from_millis(50),
    ));
    let allowance = AllowanceGuard::new(provider, builder.clone(), submitter.clone());
    (builder, allowance, submitter)
}

#[tokio::test]
async fn two_hop_native_swap_encodes_both_hops_and_funds_hop_zero() {
    let (builder, _, _) = offline_stack();
    let route = Route::try_new(
        vec![Address::from([0x01; 20]), Address::from([0x02; 20])],
        vec![true, false],
        vec![true, false],
    )
    .unwrap();
    let params = SwapParams {
        token_in: Token::new(NATIVE_TOKEN, 18),
        token_out: Token::new(Address::from([0x44; 20]), 6),
        amount_in: "1.5".to_string(),
        amount_in_units: units::parse_units("1.5", 18, "amount_in").unwrap(),
    };
    let quote = Quote::compute("250", 5, 6).unwrap();

    let op = builder.build_swap(&params, &route, &quote).await;

    // The attached value is the full native input; only the arrays carry
    // the second hop.
    assert_eq!(op.value, params.amount_in_units);
    let decoded = MarketRouter::anyToAnySwapCall::abi_decode(&op.call_data).expect("decode");
    assert_eq!(
        decoded.marketAddresses,
        vec![Address::from([0x01; 20]), Address::from([0x02; 20])]
    );
    assert_eq!(decoded.isBuy, vec![true, false]);
    assert_eq!(decoded.nativeSend, vec![true, false]);
    assert_eq!(decoded.amount, params.amount_in_units);
    assert_eq!(
        decoded.minAmountOut,
        U256::from(2375u64) * units::pow10(5) // 237.5 @ 6 decimals
    );
}

#[tokio::test]
async fn no_route_exits_before_any_chain_access() {
    let (builder, allowance, submitter) = offline_stack();
    let params = SwapParams {
        token_in: Token::new(Address::from([0x33; 20]), 6),
        token_out: Token::new(Address::from([0x44; 20]), 18),
        amount_in: "0.0001".to_string(),
        amount_in_units: units::parse_units("0.0001", 6, "amount_in").unwrap(),
    };
    let orchestrator = SwapOrchestrator::new(
        CannedRoutes(RouteQuote::no_route()),
        builder,
        allowance,
        submitter,
        params,
        5,
    );

    // Every endpoint in the stack is unreachable, so reaching NoRoute
    // proves the pipeline issued no allowance read, approval or submission.
    match orchestrator.execute().await.unwrap() {
        SwapOutcome::NoRoute => {}
        other => panic!("expected NoRoute, got {other:?}"),
    }
}

#[tokio::test]
async fn user_op_hash_differs_across_entry_points() {
    let provider = ConnectionFactory::http("http://127.0.0.1:1").unwrap();
    let signer = PrivateKeySigner::random();
    let fields = bookswap::services::account::PackedFields {
        sender: Address::from([0xaa; 20]),
        nonce: U256::ZERO,
        call_data: vec![0x01].into(),
        call_gas_limit: 1,
        verification_gas_limit: 1,
        pre_verification_gas: U256::from(1u64),
        max_priority_fee_per_gas: 1,
        max_fee_per_gas: 1,
    };
    let v07 = SmartAccount::new(
        signer.clone(),
        Address::from([0xaa; 20]),
        ENTRY_POINT_V07,
        8453,
        provider.clone(),
    );
    let other = SmartAccount::new(
        signer,
        Address::from([0xaa; 20]),
        Address::from([0xbb; 20]),
        8453,
        provider,
    );
    assert_ne!(v07.user_op_hash(&fields), other.user_op_hash(&fields));
}
