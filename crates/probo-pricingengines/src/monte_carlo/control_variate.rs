//! Delta-hedge control variate.
//!
//! Along each path the discrete Black-Scholes delta hedge accumulates
//!
//! `C = Σₖ Δ(Sₖ, tₖ) · (Sₖ₊₁ − Sₖ e^{(r−q)Δt})`
//!
//! which has zero mean under the risk-neutral measure. The estimator is
//! `e^{−rT} (f(S_T) + β C)` with `β = −1`. Payoffs that are not a plain
//! call or put are hedged with the call delta.

use super::{estimate, McSetup};
use crate::analytic_european_engine::black_scholes_delta;
use probo_core::{errors::Result, Real};
use probo_instruments::OptionType;
use probo_math::{SeedableSource, Statistics};
use probo_methods::PathGenerator;
use std::ops::Range;

const BETA: Real = -1.0;

pub(crate) fn price<R: SeedableSource>(setup: &McSetup<'_>) -> Result<(Real, Option<Real>)> {
    let expiry = setup.args.expiry;
    let strike = setup.args.strike();
    let process = &setup.process;
    let generator = PathGenerator::new(process, expiry, setup.config.time_steps)?;
    let growth = (process.carry() * generator.grid().dt()).exp();
    let option_type = setup.args.payoff.option_type().unwrap_or(OptionType::Call);

    let stats = setup.model.run(
        setup.config.replications,
        |range: Range<usize>, rng: &mut R, acc: &mut Statistics| {
            for _ in range {
                let path = generator.next_path(rng);
                let (times, values) = (path.times(), path.values());
                let control: Real = (0..path.steps())
                    .map(|k| {
                        let delta = black_scholes_delta(
                            values[k],
                            times[k],
                            strike,
                            expiry,
                            process.volatility(),
                            process.rate(),
                            process.dividend(),
                            option_type,
                        );
                        delta * (values[k + 1] - values[k] * growth)
                    })
                    .sum();
                acc.add(setup.args.payoff(path.back()) + BETA * control);
            }
            Ok(())
        },
    )?;
    Ok(estimate(&stats, setup.discount()))
}
