//! End-to-end tests of the three engine families through the option facade.
//!
//! Reference contract: K = 40, T = 0.25, S = 41, r = 8%, σ = 30%, q = 0.

use approx::assert_relative_eq;
use probo_core::{CancellationToken, Error, Real};
use probo_instruments::{
    ExoticKind, ExoticPayoff, OptionFacade, OptionType, PricingEngine, VanillaOption,
};
use probo_math::MersenneTwisterUniformRng;
use probo_pricingengines::{
    black_scholes_merton, AnalyticEuropeanEngine, BinomialEngine, BinomialPricer,
    MonteCarloConfig, MonteCarloEngine, MonteCarloPricer,
};
use probo_processes::MarketData;
use proptest::prelude::*;
use std::sync::Arc;

const REFERENCE_CALL: Real = 3.399;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn data(dividend: Real) -> MarketData {
    MarketData::new(41.0, 0.08, 0.30, dividend).unwrap()
}

fn call() -> VanillaOption {
    VanillaOption::vanilla(OptionType::Call, 40.0, 0.25).unwrap()
}

fn facade(option: VanillaOption, engine: impl PricingEngine + 'static, data: MarketData) -> OptionFacade {
    OptionFacade::new(option, Arc::new(engine), data)
}

fn analytic_call(dividend: Real) -> Real {
    black_scholes_merton(OptionType::Call, 41.0, 40.0, 0.08, dividend, 0.30, 0.25).0
}

fn mc(pricer: MonteCarloPricer, config: MonteCarloConfig) -> (Real, Real) {
    let engine = MonteCarloEngine::new(config, pricer).unwrap();
    let result = facade(call(), engine, data(0.0)).price().unwrap();
    (result.price, result.standard_error.unwrap())
}

// ─── Analytic ─────────────────────────────────────────────────────────────────

#[test]
fn test_analytic_reference_call() {
    init_tracing();
    let engine = AnalyticEuropeanEngine::from_tag("call").unwrap();
    let price = facade(call(), engine, data(0.0)).price().unwrap().price;
    assert!(
        (price - REFERENCE_CALL).abs() < 1e-3,
        "analytic call = {price:.4}"
    );
}

proptest! {
    #[test]
    fn test_analytic_put_call_parity(
        spot in 10.0f64..200.0,
        strike in 10.0f64..200.0,
        rate in -0.02f64..0.15,
        volatility in 0.01f64..1.0,
        dividend in 0.0f64..0.1,
        expiry in 0.05f64..3.0,
    ) {
        let market = MarketData::new(spot, rate, volatility, dividend).unwrap();
        let call = VanillaOption::vanilla(OptionType::Call, strike, expiry).unwrap();
        let put = VanillaOption::vanilla(OptionType::Put, strike, expiry).unwrap();
        let c = call.price(&AnalyticEuropeanEngine::new(OptionType::Call), &market).unwrap().price;
        let p = put.price(&AnalyticEuropeanEngine::new(OptionType::Put), &market).unwrap().price;
        let parity = spot * (-dividend * expiry).exp() - strike * (-rate * expiry).exp();
        prop_assert!((c - p - parity).abs() < 1e-9 * (1.0 + spot + strike));
    }
}

// ─── Binomial ─────────────────────────────────────────────────────────────────

#[test]
fn test_binomial_converges_to_analytic() {
    init_tracing();
    let engine = BinomialEngine::new(500, BinomialPricer::European).unwrap();
    let price = facade(call(), engine, data(0.0)).price().unwrap().price;
    let analytic = analytic_call(0.0);
    assert!(
        (price - analytic).abs() < 0.01,
        "binomial {price:.4} vs analytic {analytic:.4}"
    );
}

#[test]
fn test_american_call_without_dividend_equals_european() {
    for steps in [3, 50, 500] {
        let eu = BinomialEngine::new(steps, BinomialPricer::European).unwrap();
        let am = BinomialEngine::new(steps, BinomialPricer::American).unwrap();
        let eu = call().price(&eu, &data(0.0)).unwrap().price;
        let am = call().price(&am, &data(0.0)).unwrap().price;
        assert!(am >= eu - 1e-9, "steps={steps}: American {am} < European {eu}");
        assert_relative_eq!(am, eu, epsilon = 1e-9);
    }
}

#[test]
fn test_american_call_with_dividend_dominates_european() {
    let option = VanillaOption::vanilla(OptionType::Call, 40.0, 1.0).unwrap();
    let eu = BinomialEngine::new(300, BinomialPricer::European).unwrap();
    let am = BinomialEngine::new(300, BinomialPricer::American).unwrap();
    let eu = option.price(&eu, &data(0.08)).unwrap().price;
    let am = option.price(&am, &data(0.08)).unwrap().price;
    assert!(am > eu, "American {am:.4} ≤ European {eu:.4}");
}

#[test]
fn test_three_step_american_call() {
    let am = BinomialEngine::new(3, BinomialPricer::American).unwrap();
    let eu = BinomialEngine::new(3, BinomialPricer::European).unwrap();
    let am = facade(call(), am, data(0.0)).price().unwrap().price;
    let eu = facade(call(), eu, data(0.0)).price().unwrap().price;
    assert!(am.is_finite());
    assert!(am >= eu - 1e-12, "American {am} < European {eu}");
}

#[test]
fn test_binomial_large_step_count_matches_analytic() {
    // σ√(T·steps) ≈ 775: the top of the terminal layer overflows f64
    let option = VanillaOption::vanilla(OptionType::Call, 40.0, 10.0).unwrap();
    let market = MarketData::new(41.0, 0.08, 1.0, 0.0).unwrap();
    let engine = BinomialEngine::new(60_000, BinomialPricer::European).unwrap();
    let price = option.price(&engine, &market).unwrap().price;
    let (analytic, ..) = black_scholes_merton(OptionType::Call, 41.0, 40.0, 0.08, 0.0, 1.0, 10.0);
    assert!(
        (price - analytic).abs() < 1e-3,
        "binomial {price:.5} vs analytic {analytic:.5}"
    );
}

#[test]
fn test_american_lattice_with_overflowing_nodes() {
    // σ√(T·steps) ≈ 790 with 2 500 steps keeps the roll-back small
    let option = VanillaOption::vanilla(OptionType::Call, 40.0, 10.0).unwrap();
    let market = MarketData::new(41.0, 0.08, 5.0, 0.0).unwrap();
    let eu = BinomialEngine::new(2_500, BinomialPricer::European).unwrap();
    let am = BinomialEngine::new(2_500, BinomialPricer::American).unwrap();
    let eu = option.price(&eu, &market).unwrap().price;
    let am = option.price(&am, &market).unwrap().price;
    let (analytic, ..) = black_scholes_merton(OptionType::Call, 41.0, 40.0, 0.08, 0.0, 5.0, 10.0);
    assert_relative_eq!(am, eu, max_relative = 1e-8);
    assert_relative_eq!(eu, analytic, max_relative = 1e-4);
}

// ─── Monte Carlo ──────────────────────────────────────────────────────────────

#[test]
fn test_monte_carlo_pricers_agree_with_analytic() {
    init_tracing();
    let analytic = analytic_call(0.0);
    let config = MonteCarloConfig::new(20_000, 10).unwrap();
    for pricer in [
        MonteCarloPricer::Naive,
        MonteCarloPricer::Antithetic,
        MonteCarloPricer::Stratified,
        MonteCarloPricer::ControlVariate,
    ] {
        let (price, se) = mc(pricer, config);
        assert!(se > 0.0, "{pricer:?}: zero standard error");
        assert!(
            (price - analytic).abs() <= 3.0 * se,
            "{pricer:?}: {price:.4} ± {se:.4} vs analytic {analytic:.4}"
        );
    }
}

#[test]
fn test_variance_reduction_beats_naive() {
    let config = MonteCarloConfig::new(10_000, 1).unwrap().with_seed(2024);
    let (_, naive) = mc(MonteCarloPricer::Naive, config);
    let (_, antithetic) = mc(MonteCarloPricer::Antithetic, config);
    let (_, stratified) = mc(MonteCarloPricer::Stratified, config);
    let (_, control) = mc(MonteCarloPricer::ControlVariate, config.with_time_steps(10));
    assert!(antithetic <= naive, "antithetic {antithetic} > naive {naive}");
    assert!(stratified <= naive, "stratified {stratified} > naive {naive}");
    assert!(control <= naive, "control variate {control} > naive {naive}");
}

#[test]
fn test_monte_carlo_is_reproducible() {
    let config = MonteCarloConfig::new(5_000, 4).unwrap().with_chunk_size(256);
    for pricer in [
        MonteCarloPricer::Naive,
        MonteCarloPricer::Stratified,
        MonteCarloPricer::ArithmeticAsian {
            geometric_control: true,
        },
    ] {
        let parallel = mc(pricer, config);
        let again = mc(pricer, config);
        let sequential = mc(pricer, config.with_parallel(false));
        assert_eq!(parallel, again, "{pricer:?}: repeated run differs");
        assert_eq!(parallel, sequential, "{pricer:?}: parallel run differs");
    }
}

#[test]
fn test_seed_changes_estimate() {
    let config = MonteCarloConfig::new(2_000, 1).unwrap();
    let a = mc(MonteCarloPricer::Naive, config.with_seed(1));
    let b = mc(MonteCarloPricer::Naive, config.with_seed(2));
    assert_ne!(a.0, b.0);
}

#[test]
fn test_single_sample_unit_has_no_standard_error() {
    for (pricer, replications) in [
        (MonteCarloPricer::Naive, 1),
        (MonteCarloPricer::Antithetic, 1),
        (MonteCarloPricer::Antithetic, 2),
        (MonteCarloPricer::Stratified, 1),
        (MonteCarloPricer::ControlVariate, 1),
        (MonteCarloPricer::Lookback, 1),
    ] {
        let config = MonteCarloConfig::new(replications, 1).unwrap();
        let engine = MonteCarloEngine::new(config, pricer).unwrap();
        let result = call().price(&engine, &data(0.0)).unwrap();
        assert!(result.price.is_finite() && result.price >= 0.0);
        assert_eq!(
            result.standard_error, None,
            "{pricer:?} with {replications} replications"
        );
    }

    for (pricer, replications) in [
        (MonteCarloPricer::Naive, 2),
        (MonteCarloPricer::Antithetic, 3),
        (MonteCarloPricer::Stratified, 2),
    ] {
        let config = MonteCarloConfig::new(replications, 1).unwrap();
        let engine = MonteCarloEngine::new(config, pricer).unwrap();
        let result = call().price(&engine, &data(0.0)).unwrap();
        assert!(
            result.standard_error.is_some(),
            "{pricer:?} with {replications} replications"
        );
    }
}

#[test]
fn test_mersenne_twister_source() {
    let config = MonteCarloConfig::new(20_000, 1).unwrap();
    let engine =
        MonteCarloEngine::<MersenneTwisterUniformRng>::with_source(config, MonteCarloPricer::Naive)
            .unwrap();
    let result = call().price(&engine, &data(0.0)).unwrap();
    let se = result.standard_error.unwrap();
    assert!((result.price - analytic_call(0.0)).abs() <= 3.0 * se);
}

#[test]
fn test_dividend_enters_monte_carlo_drift() {
    let market = data(0.05);
    let analytic = analytic_call(0.05);
    let config = MonteCarloConfig::new(20_000, 1).unwrap();
    for pricer in [MonteCarloPricer::Antithetic, MonteCarloPricer::Stratified] {
        let engine = MonteCarloEngine::new(config, pricer).unwrap();
        let result = call().price(&engine, &market).unwrap();
        let se = result.standard_error.unwrap();
        assert!(
            (result.price - analytic).abs() <= 3.0 * se,
            "{pricer:?}: {:.4} ± {se:.4} vs {analytic:.4}",
            result.price
        );
    }
}

#[test]
fn test_squared_spot_payoff() {
    // S_T² is lognormal with volatility 2σ and mean S₀² e^{(2r + σ²)T}
    let (s, r, v, t, k): (f64, f64, f64, f64, f64) = (41.0, 0.08, 0.30, 0.25, 1_600.0);
    let forward = s * s * ((2.0 * r + v * v) * t).exp();
    let (expected, ..) =
        black_scholes_merton(OptionType::Call, forward * (-r * t).exp(), k, r, 0.0, 2.0 * v, t);

    let option = VanillaOption::new(Arc::new(ExoticPayoff::new(ExoticKind::Squared, k).unwrap()), t)
        .unwrap();
    let engine =
        MonteCarloEngine::new(MonteCarloConfig::new(40_000, 1).unwrap(), MonteCarloPricer::Naive)
            .unwrap();
    let result = option.price(&engine, &data(0.0)).unwrap();
    let se = result.standard_error.unwrap();
    assert!(
        (result.price - expected).abs() <= 3.0 * se,
        "squared spot: {:.3} ± {se:.3} vs {expected:.3}",
        result.price
    );
}

#[test]
fn test_asian_geometric_control_reduces_error() {
    let config = MonteCarloConfig::new(10_000, 12).unwrap();
    let (plain, plain_se) = mc(
        MonteCarloPricer::ArithmeticAsian {
            geometric_control: false,
        },
        config,
    );
    let (controlled, controlled_se) = mc(
        MonteCarloPricer::ArithmeticAsian {
            geometric_control: true,
        },
        config,
    );
    assert!(controlled_se < 0.5 * plain_se, "{controlled_se} vs {plain_se}");
    assert!((plain - controlled).abs() <= 3.0 * plain_se);
    // averaging lowers the effective volatility
    assert!(controlled < analytic_call(0.0));
}

#[test]
fn test_asian_rejects_exotic_payoff() {
    let option = VanillaOption::new(
        Arc::new(ExoticPayoff::new(ExoticKind::Sqrt, 6.0).unwrap()),
        0.25,
    )
    .unwrap();
    let engine = MonteCarloEngine::new(
        MonteCarloConfig::default(),
        MonteCarloPricer::ArithmeticAsian {
            geometric_control: true,
        },
    )
    .unwrap();
    assert!(matches!(
        option.price(&engine, &data(0.0)),
        Err(Error::UnsupportedPayoffType(_))
    ));
}

#[test]
fn test_lookback_call_dominates_european() {
    let config = MonteCarloConfig::new(10_000, 50).unwrap();
    let (price, se) = mc(MonteCarloPricer::Lookback, config);
    assert!(price > analytic_call(0.0) + 3.0 * se);
}

#[test]
fn test_monte_carlo_cancellation() {
    let token = CancellationToken::new();
    token.cancel();
    let engine = MonteCarloEngine::new(MonteCarloConfig::default(), MonteCarloPricer::Naive)
        .unwrap()
        .with_cancellation(token);
    assert_eq!(
        call().price(&engine, &data(0.0)).unwrap_err(),
        Error::Cancelled
    );
}

// ─── Configuration errors ─────────────────────────────────────────────────────

#[test]
fn test_invalid_configuration_is_reported() {
    assert!(matches!(
        BinomialEngine::new(0, BinomialPricer::European),
        Err(Error::Precondition(_))
    ));
    assert!(matches!(
        MonteCarloEngine::new(
            MonteCarloConfig::default().with_replications(0),
            MonteCarloPricer::Naive
        ),
        Err(Error::Precondition(_))
    ));
    assert!(matches!(
        MonteCarloEngine::new(
            MonteCarloConfig::default().with_time_steps(0),
            MonteCarloPricer::Lookback
        ),
        Err(Error::Precondition(_))
    ));
    assert!(matches!(
        AnalyticEuropeanEngine::from_tag("binary"),
        Err(Error::UnsupportedPayoffType(_))
    ));
    assert!(VanillaOption::vanilla(OptionType::Call, 40.0, 0.0).is_err());
    assert!(VanillaOption::vanilla(OptionType::Call, -40.0, 0.25).is_err());
}

#[test]
fn test_engine_error_propagates_through_facade() {
    let flat = MarketData::new(41.0, 0.08, 0.0, 0.0).unwrap();
    let engine = BinomialEngine::new(10, BinomialPricer::American).unwrap();
    assert!(matches!(
        facade(call(), engine, flat).price(),
        Err(Error::NumericDegeneracy(_))
    ));
}
