//! Closed-form Black-Scholes engine for European calls and puts.
//!
//! Besides the price, the engine reports the first- and second-order
//! sensitivities as additional results.

use probo_core::{errors::Error, errors::Result, Real, Time};
use probo_instruments::{OptionType, PricingEngine, PricingResults, VanillaOptionArguments};
use probo_math::distributions::{normal_cdf, normal_pdf};
use probo_processes::MarketData;
use tracing::debug;

/// Below this `σ√T` the terminal spot is treated as known.
const MIN_STD_DEV: Real = 1e-15;

/// Analytic pricing engine for European vanilla options.
///
/// With `φ = +1` for a call and `−1` for a put,
///
/// $$V = \phi \left(S e^{-qT} N(\phi d_1) - K e^{-rT} N(\phi d_2)\right)$$
///
/// where $d_1 = \frac{\ln(F/K) + \sigma^2 T/2}{\sigma\sqrt{T}}$,
/// $d_2 = d_1 - \sigma\sqrt{T}$ and $F = S e^{(r-q)T}$.
///
/// The engine is configured with the option type it prices. A payoff of a
/// different type, or one that is not a plain call or put, is rejected with
/// [`Error::UnsupportedPayoffType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticEuropeanEngine {
    option_type: OptionType,
}

impl AnalyticEuropeanEngine {
    /// Engine pricing `option_type`.
    pub fn new(option_type: OptionType) -> Self {
        Self { option_type }
    }

    /// Engine from a `"call"` / `"put"` tag.
    pub fn from_tag(tag: &str) -> Result<Self> {
        Ok(Self::new(tag.parse()?))
    }

    /// The option type this engine prices.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }
}

/// Black-Scholes-Merton value of a European option and its greeks.
///
/// Returns `(price, delta, gamma, vega, theta, rho)`. Vega and rho are per
/// unit change of volatility and rate, theta is per year. At or after
/// expiry the price is the intrinsic value; with zero volatility it is the
/// discounted intrinsic value of the forward.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    rate: Real,
    dividend: Real,
    volatility: Real,
    expiry: Time,
) -> (Real, Real, Real, Real, Real, Real) {
    let phi = option_type.sign();
    if expiry <= 0.0 {
        let exercise = (phi * (spot - strike)).max(0.0);
        let delta = if exercise > 0.0 { phi } else { 0.0 };
        return (exercise, delta, 0.0, 0.0, 0.0, 0.0);
    }

    let root_t = expiry.sqrt();
    let sd = volatility * root_t;
    let rate_discount = (-rate * expiry).exp();
    let dividend_discount = (-dividend * expiry).exp();
    let forward = spot * dividend_discount / rate_discount;

    let diffusive = sd > MIN_STD_DEV;
    let (d1, d2) = if diffusive {
        let d1 = ((forward / strike).ln() + 0.5 * sd * sd) / sd;
        (d1, d1 - sd)
    } else {
        // d₁ = d₂ = ±∞ on the side of the strike the forward lies
        let side = if forward > strike { 1e15 } else { -1e15 };
        (side, side)
    };

    let n1 = normal_cdf(phi * d1);
    let n2 = normal_cdf(phi * d2);
    let density = normal_pdf(d1);
    let spot_leg = spot * dividend_discount;
    let strike_leg = strike * rate_discount;

    let price = phi * (spot_leg * n1 - strike_leg * n2);
    let delta = phi * dividend_discount * n1;
    let gamma = if diffusive {
        dividend_discount * density / (spot * sd)
    } else {
        0.0
    };
    let vega = spot_leg * density * root_t;
    let theta = phi * (dividend * spot_leg * n1 - rate * strike_leg * n2)
        - spot_leg * density * volatility / (2.0 * root_t);
    let rho = phi * expiry * strike_leg * n2;

    (price, delta, gamma, vega, theta, rho)
}

/// Black-Scholes delta at calendar time `t` of an option expiring at
/// `expiry`, with the underlying at `spot`.
#[allow(clippy::too_many_arguments)]
pub fn black_scholes_delta(
    spot: Real,
    t: Time,
    strike: Real,
    expiry: Time,
    volatility: Real,
    rate: Real,
    dividend: Real,
    option_type: OptionType,
) -> Real {
    let (_, delta, ..) = black_scholes_merton(
        option_type,
        spot,
        strike,
        rate,
        dividend,
        volatility,
        expiry - t,
    );
    delta
}

impl PricingEngine for AnalyticEuropeanEngine {
    fn calculate(&self, args: &VanillaOptionArguments, data: &MarketData) -> Result<PricingResults> {
        match args.payoff.option_type() {
            Some(t) if t == self.option_type => {}
            Some(t) => {
                return Err(Error::UnsupportedPayoffType(format!(
                    "engine prices {} options, payoff is a {t}",
                    self.option_type
                )))
            }
            None => {
                return Err(Error::UnsupportedPayoffType(format!(
                    "analytic engine cannot price a {} payoff",
                    args.payoff.name()
                )))
            }
        }

        let (spot, rate, volatility, dividend) = data.get_data();
        let (price, delta, gamma, vega, theta, rho) = black_scholes_merton(
            self.option_type,
            spot,
            args.strike(),
            rate,
            dividend,
            volatility,
            args.expiry,
        );
        debug!(
            option_type = %self.option_type,
            price,
            delta,
            "analytic black-scholes price"
        );

        let greeks = [
            ("delta", delta),
            ("gamma", gamma),
            ("vega", vega),
            ("theta", theta),
            ("rho", rho),
        ];
        Ok(greeks
            .into_iter()
            .fold(PricingResults::from_price(price), |results, (name, value)| {
                results.with_result(name, value)
            }))
    }
}
