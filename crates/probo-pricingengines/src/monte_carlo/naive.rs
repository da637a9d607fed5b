//! Plain Monte Carlo on the exact terminal distribution.

use super::{estimate, McSetup};
use probo_core::{errors::Result, Real};
use probo_math::{SeedableSource, Statistics};
use std::ops::Range;

pub(crate) fn price<R: SeedableSource>(setup: &McSetup<'_>) -> Result<(Real, Option<Real>)> {
    let expiry = setup.args.expiry;
    let x0 = setup.process.x0();

    let stats = setup.model.run(
        setup.config.replications,
        |range: Range<usize>, rng: &mut R, acc: &mut Statistics| {
            for _ in range {
                let spot_t = setup.process.evolve(x0, expiry, rng.next_normal());
                acc.add(setup.args.payoff(spot_t));
            }
            Ok(())
        },
    )?;
    Ok(estimate(&stats, setup.discount()))
}
