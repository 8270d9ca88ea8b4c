// Exhaustive sweeps over the quote math: the minimum output must never
// exceed the raw output, collapse exactly at the boundaries, and move
// monotonically with both arguments.

use alloy::primitives::U256;
use bookswap::common::units;
use bookswap::core::quote::Quote;

fn min_output(raw: &str, slippage: u8, decimals: u8) -> U256 {
    Quote::compute(raw, slippage, decimals).unwrap().min_output
}

#[test]
fn bounded_by_raw_output_for_every_slippage() {
    let raws = [
        "0", "0.000001", "0.5", "1", "3.1415926", "100", "123456.789", "999999999.999999",
    ];
    for s in 0u8..=100 {
        for raw in raws {
            let exact = min_output(raw, 0, 18);
            let bounded = min_output(raw, s, 18);
            assert!(bounded <= exact, "raw={raw} s={s}");
        }
    }
}

#[test]
fn boundary_slippages() {
    for raw in ["0", "1", "0.25", "42.42"] {
        // s = 0: exact quote, nothing shaved off.
        assert_eq!(
            min_output(raw, 0, 12),
            units::parse_units(raw, 12, "raw").unwrap(),
            "raw={raw}"
        );
        // s = 100: the floor collapses to zero.
        assert_eq!(min_output(raw, 100, 12), U256::ZERO, "raw={raw}");
    }
}

#[test]
fn monotone_nondecreasing_in_raw_output() {
    let ordered = ["0", "0.1", "0.11", "1", "2.5", "10", "1000"];
    for s in 0u8..=100 {
        let mut prev = U256::ZERO;
        for raw in ordered {
            let v = min_output(raw, s, 9);
            assert!(v >= prev, "raw={raw} s={s}");
            prev = v;
        }
    }
}

#[test]
fn monotone_nonincreasing_in_slippage() {
    for raw in ["0.000123", "1", "77.7", "123456"] {
        let mut prev = U256::MAX;
        for s in 0u8..=100 {
            let v = min_output(raw, s, 9);
            assert!(v <= prev, "raw={raw} s={s}");
            prev = v;
        }
    }
}

#[test]
fn usdc_to_wif_example() {
    // 0.0001 USDC in (irrelevant to the quote), raw output 100 WIF,
    // 5% tolerance, 18-decimal target: floor(100 * 95 / 100) = 95 WIF.
    let expected = U256::from(95u64) * units::pow10(18);
    assert_eq!(min_output("100", 5, 18), expected);
}

#[test]
fn truncation_is_exact_at_unit_scale() {
    // 0.0000019 output at 6 decimals with no slippage: the seventh digit
    // cannot be represented and must be dropped, not rounded up.
    assert_eq!(min_output("0.0000019", 0, 6), U256::from(1u64));
}
