
use bs_surface::models::bs::{call_price, put_price};
use bs_surface::{price, OptionType, PricingError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_utils::{assert_close, params, parity_gap, reference_params, PARITY_TOL, REF_TOL};

/// Pins the reference request T=2, K=90, S=100, σ=0.2, r=0.05.
/// Values were computed independently with an erfc-based normal CDF.
#[test]
fn test_reference_values() {
    let res = reference_params().price();

    assert_close(res.call_price, 22.033_380_013_718, REF_TOL, "call price");
    assert_close(res.put_price, 3.468_747_636_954, REF_TOL, "put price");
    assert_close(res.call_delta, 0.807_160_582_931_6, REF_TOL, "call delta");
    assert_close(res.put_delta, -0.192_839_417_068_4, REF_TOL, "put delta");
    assert_close(res.gamma, 0.009_681_818_453_569, 1e-9, "gamma");
}

/// At-the-money one-year option, the textbook 10.4506 / 5.5735 pair.
#[test]
fn test_atm_textbook_values() {
    let res = price(1.0, 100.0, 100.0, 0.2, 0.05).expect("valid request");

    assert_close(res.call_price, 10.450_583_572_186, REF_TOL, "call price");
    assert_close(res.put_price, 5.573_526_022_257, REF_TOL, "put price");
    assert_close(res.gamma, 0.018_762_017_345_847, 1e-9, "gamma");
}

/// A negative rate and an out-of-the-money call.
#[test]
fn test_negative_rate_values() {
    let res = price(0.5, 100.0, 80.0, 0.3, -0.01).expect("negative rates are valid");

    assert_close(res.call_price, 1.364_757_851_436, REF_TOL, "call price");
    assert_close(res.put_price, 21.866_009_937_376, REF_TOL, "put price");
    assert_close(res.call_delta, 0.166_169_584_940_849, REF_TOL, "call delta");
}

/// The free function, the validated request and the convenience helpers agree.
#[test]
fn test_entry_points_agree() {
    let p = reference_params();
    let via_params = p.price();
    let via_fn = price(2.0, 90.0, 100.0, 0.2, 0.05).unwrap();

    assert_eq!(via_params, via_fn);
    assert_eq!(call_price(2.0, 90.0, 100.0, 0.2, 0.05).unwrap(), via_fn.call_price);
    assert_eq!(put_price(2.0, 90.0, 100.0, 0.2, 0.05).unwrap(), via_fn.put_price);
    assert_eq!(via_fn.price_of(OptionType::Call), via_fn.call_price);
    assert_eq!(via_fn.delta_of(OptionType::Put), via_fn.put_delta);
    assert_eq!(via_fn.call_gamma(), via_fn.put_gamma());
}

/// Randomized sweep over a realistic parameter box checking the model identities:
/// put-call parity, delta bounds, delta spread and gamma positivity.
#[test]
fn test_identities_random_sweep() {
    let mut rng = StdRng::seed_from_u64(20240607);

    for _ in 0..2_000 {
        let k = rng.gen_range(20.0..500.0);
        let s = k * rng.gen_range(-0.3f64..0.3).exp();
        let t = rng.gen_range(0.25..3.0);
        let sigma = rng.gen_range(0.15..0.6);
        let r = rng.gen_range(-0.02..0.08);

        let p = params(t, k, s, sigma, r);
        let res = p.price();

        assert!(res.is_finite(), "non-finite result for {:?}: {:?}", p, res);
        assert!(
            parity_gap(&p, &res).abs() < PARITY_TOL,
            "parity violated for {:?}: gap {:e}",
            p,
            parity_gap(&p, &res)
        );
        assert!(
            (0.0..=1.0).contains(&res.call_delta),
            "call delta out of [0, 1]: {}",
            res.call_delta
        );
        assert!(
            (-1.0..=0.0).contains(&res.put_delta),
            "put delta out of [-1, 0]: {}",
            res.put_delta
        );
        assert_close(res.call_delta - res.put_delta, 1.0, 1e-12, "delta spread");
        assert!(res.gamma > 0.0, "gamma should be positive, got {}", res.gamma);
        assert!(res.call_price >= 0.0 && res.put_price >= 0.0);
    }
}

/// Call price rises and put price falls as spot increases.
#[test]
fn test_monotonic_in_spot() {
    let mut prev = price(1.0, 100.0, 50.0, 0.25, 0.03).unwrap();
    let mut s = 50.5;

    while s <= 200.0 {
        let res = price(1.0, 100.0, s, 0.25, 0.03).unwrap();
        assert!(
            res.call_price >= prev.call_price - 1e-12,
            "call decreased at S={}: {} -> {}",
            s,
            prev.call_price,
            res.call_price
        );
        assert!(
            res.put_price <= prev.put_price + 1e-12,
            "put increased at S={}: {} -> {}",
            s,
            prev.put_price,
            res.put_price
        );
        prev = res;
        s += 0.5;
    }
}

/// Prices approach intrinsic value deep in and out of the money.
#[test]
fn test_deep_moneyness_limits() {
    let deep_itm_call = price(0.5, 50.0, 200.0, 0.2, 0.05).unwrap();
    let df = (-0.05f64 * 0.5).exp();
    assert_close(deep_itm_call.call_price, 200.0 - 50.0 * df, 1e-9, "deep ITM call");
    assert_close(deep_itm_call.call_delta, 1.0, 1e-12, "deep ITM call delta");
    assert!(deep_itm_call.put_price >= 0.0 && deep_itm_call.put_price < 1e-12);

    let deep_otm_call = price(0.5, 200.0, 50.0, 0.2, 0.05).unwrap();
    assert!(deep_otm_call.call_price >= 0.0 && deep_otm_call.call_price < 1e-12);
    assert_close(deep_otm_call.put_delta, -1.0, 1e-12, "deep OTM call put delta");
}

/// Zero volatility, zero maturity and other out-of-domain inputs return typed errors
/// instead of silently wrong finite numbers.
#[test]
fn test_degenerate_inputs() {
    let cases: [((f64, f64, f64, f64, f64), &str); 8] = [
        ((2.0, 90.0, 100.0, 0.0, 0.05), "volatility"),
        ((0.0, 90.0, 100.0, 0.2, 0.05), "time_to_maturity"),
        ((2.0, 0.0, 100.0, 0.2, 0.05), "strike"),
        ((2.0, 90.0, 0.0, 0.2, 0.05), "current_price"),
        ((-1.0, 90.0, 100.0, 0.2, 0.05), "time_to_maturity"),
        ((2.0, 90.0, 100.0, -0.2, 0.05), "volatility"),
        ((2.0, 90.0, f64::NAN, 0.2, 0.05), "current_price"),
        ((2.0, 90.0, 100.0, 0.2, f64::INFINITY), "interest_rate"),
    ];

    for ((t, k, s, sigma, r), expected) in cases {
        match price(t, k, s, sigma, r) {
            Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(
                name, expected,
                "wrong field reported for ({}, {}, {}, {}, {})",
                t, k, s, sigma, r
            ),
            other => panic!("expected InvalidParameter({}), got {:?}", expected, other),
        }
    }
}

/// Huge total variance is valid input and reaches the limits call = S, put = 0.
#[test]
fn test_extreme_inputs_do_not_error() {
    let res = price(1e6, 100.0, 100.0, 50.0, 0.05).expect("extreme but valid input");

    assert!(res.is_finite(), "expected finite limits, got {:?}", res);
    assert_close(res.call_price, 100.0, 1e-9, "call tends to spot");
    assert_close(res.put_price, 0.0, 1e-9, "put tends to zero");
    assert_close(res.call_delta, 1.0, 1e-12, "call delta");
    assert_close(res.gamma, 0.0, 1e-12, "gamma");
}

/// Valid inputs whose intermediate terms overflow (total volatility and drift both
/// infinite, so d1 is NaN) propagate non-finite values instead of returning an error.
#[test]
fn test_overflow_propagates_non_finite() {
    let res = price(1e300, 100.0, 100.0, 1e200, 0.0).expect("positive finite inputs are valid");
    assert!(res.gamma.is_nan(), "gamma should be NaN, got {}", res.gamma);
    assert!(!res.is_finite(), "expected overflow to surface, got {:?}", res);
}
