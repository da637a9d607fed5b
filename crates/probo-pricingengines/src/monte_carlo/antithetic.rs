//! Antithetic variates: every draw `z` is paired with `−z`.
//!
//! The pair average is the sample unit, so the standard error reflects the
//! negative correlation within each pair.

use super::{estimate, McSetup};
use probo_core::{errors::Result, Real};
use probo_math::{SeedableSource, Statistics};
use std::ops::Range;

pub(crate) fn price<R: SeedableSource>(setup: &McSetup<'_>) -> Result<(Real, Option<Real>)> {
    let expiry = setup.args.expiry;
    let x0 = setup.process.x0();
    let pairs = setup.config.replications.div_ceil(2);

    let stats = setup.model.run(
        pairs,
        |range: Range<usize>, rng: &mut R, acc: &mut Statistics| {
            for _ in range {
                let z = rng.next_normal();
                let up = setup.args.payoff(setup.process.evolve(x0, expiry, z));
                let down = setup.args.payoff(setup.process.evolve(x0, expiry, -z));
                acc.add(0.5 * (up + down));
            }
            Ok(())
        },
    )?;
    Ok(estimate(&stats, setup.discount()))
}
