//! Arithmetic-average Asian options, optionally with the geometric-average
//! closed form as control variate.
//!
//! Averages run over the `N + 1` points of a path with `N` equal steps,
//! today's spot included.

use super::{estimate, McSetup};
use probo_core::{errors::Error, errors::Result, Real, Time};
use probo_instruments::OptionType;
use probo_math::{normal_cdf, SeedableSource, Statistics};
use probo_methods::PathGenerator;
use std::ops::Range;

/// Price of a discretely monitored geometric-average Asian option.
///
/// The average is taken over `fixings + 1` equally spaced points in
/// `[0, expiry]`, the first being today's `spot`. The log of that average is
/// normal, which gives a Black-Scholes form with
///
/// `σ̂ = σ √((2N + 1) / (6(N + 1)))`
/// `ρ = ½(r − q − ½σ²) + ½σ̂²`
///
/// `d₁ = (ln(S/K) + (ρ + ½σ̂²)T) / (σ̂√T)`, `d₂ = d₁ − σ̂√T`.
#[allow(clippy::too_many_arguments)]
pub fn geometric_asian_price(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    rate: Real,
    dividend: Real,
    volatility: Real,
    expiry: Time,
    fixings: usize,
) -> Real {
    let n = fixings as Real;
    let vol_hat = volatility * ((2.0 * n + 1.0) / (6.0 * (n + 1.0))).sqrt();
    let rho = 0.5 * (rate - dividend - 0.5 * volatility * volatility) + 0.5 * vol_hat * vol_hat;
    let discount = (-rate * expiry).exp();
    let expected_average = spot * (rho * expiry).exp();
    let phi = option_type.sign();

    let std_dev = vol_hat * expiry.sqrt();
    if std_dev <= 1e-15 {
        return discount * (phi * (expected_average - strike)).max(0.0);
    }
    let d1 = ((spot / strike).ln() + (rho + 0.5 * vol_hat * vol_hat) * expiry) / std_dev;
    let d2 = d1 - std_dev;

    phi * discount * (expected_average * normal_cdf(phi * d1) - strike * normal_cdf(phi * d2))
}

pub(crate) fn price<R: SeedableSource>(
    setup: &McSetup<'_>,
    geometric_control: bool,
) -> Result<(Real, Option<Real>)> {
    let option_type = setup.args.payoff.option_type().ok_or_else(|| {
        Error::UnsupportedPayoffType(format!(
            "Asian pricer needs a call or put payoff, got {}",
            setup.args.payoff.name()
        ))
    })?;
    let process = &setup.process;
    let expiry = setup.args.expiry;
    let time_steps = setup.config.time_steps;
    let generator = PathGenerator::new(process, expiry, time_steps)?;
    let discount = setup.discount();

    let geometric_price = geometric_control.then(|| {
        geometric_asian_price(
            option_type,
            process.x0(),
            setup.args.strike(),
            process.rate(),
            process.dividend(),
            process.volatility(),
            expiry,
            time_steps,
        )
    });

    let stats = setup.model.run(
        setup.config.replications,
        |range: Range<usize>, rng: &mut R, acc: &mut Statistics| {
            for _ in range {
                let path = generator.next_path(rng);
                let arithmetic = discount * setup.args.payoff(path.arithmetic_average());
                let value = match geometric_price {
                    Some(analytic) => {
                        arithmetic - discount * setup.args.payoff(path.geometric_average())
                            + analytic
                    }
                    None => arithmetic,
                };
                acc.add(value);
            }
            Ok(())
        },
    )?;
    Ok(estimate(&stats, 1.0))
}
