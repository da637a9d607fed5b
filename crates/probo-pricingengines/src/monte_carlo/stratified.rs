//! Stratified sampling: one uniform draw per equal-width stratum of `(0, 1)`.
//!
//! Stratum `i` of `n` maps its uniform `U` to `û = (i + U)/n` and then to
//! `z = Φ⁻¹(û)`. The sample unit is a pair of adjacent strata: the squared
//! difference of their payoffs estimates the sum of their variances, so
//!
//! `SE = √(Σ (f₂ₖ − f₂ₖ₊₁)²) / n`
//!
//! With an odd `n` the last stratum has no partner and contributes to the
//! mean only. A single stratum has no pair at all and no standard error.

use super::McSetup;
use probo_core::{errors::Result, Real};
use probo_math::{normal_cdf_inverse, SeedableSource};
use probo_methods::SampleAccumulator;
use std::ops::Range;

/// Largest double below 1.
const BELOW_ONE: Real = 1.0 - Real::EPSILON / 2.0;

#[derive(Debug, Default)]
struct StratifiedSum {
    sum: Real,
    squared_differences: Real,
}

impl SampleAccumulator for StratifiedSum {
    fn merge(&mut self, other: Self) {
        self.sum += other.sum;
        self.squared_differences += other.squared_differences;
    }
}

pub(crate) fn price<R: SeedableSource>(setup: &McSetup<'_>) -> Result<(Real, Option<Real>)> {
    let expiry = setup.args.expiry;
    let x0 = setup.process.x0();
    let n = setup.config.replications;
    let width = 1.0 / n as Real;

    let totals = setup.model.run(
        n.div_ceil(2),
        |range: Range<usize>, rng: &mut R, acc: &mut StratifiedSum| {
            for unit in range {
                let first = 2 * unit;
                let last = (first + 2).min(n);
                let mut pair = [0.0; 2];
                for (slot, stratum) in (first..last).enumerate() {
                    let u_hat = ((stratum as Real + rng.next_uniform()) * width).min(BELOW_ONE);
                    let z = normal_cdf_inverse(u_hat)?;
                    pair[slot] = setup.args.payoff(setup.process.evolve(x0, expiry, z));
                }
                acc.sum += pair[0] + pair[1];
                if last - first == 2 {
                    acc.squared_differences += (pair[0] - pair[1]).powi(2);
                }
            }
            Ok(())
        },
    )?;

    let discount = setup.discount();
    let standard_error = (n >= 2).then(|| discount * totals.squared_differences.sqrt() * width);
    Ok((discount * totals.sum * width, standard_error))
}
