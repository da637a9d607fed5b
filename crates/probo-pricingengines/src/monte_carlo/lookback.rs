//! Lookback: the payoff is applied to the path maximum.

use super::{estimate, McSetup};
use probo_core::{errors::Result, Real};
use probo_math::{SeedableSource, Statistics};
use probo_methods::PathGenerator;
use std::ops::Range;

pub(crate) fn price<R: SeedableSource>(setup: &McSetup<'_>) -> Result<(Real, Option<Real>)> {
    let generator = PathGenerator::new(&setup.process, setup.args.expiry, setup.config.time_steps)?;

    let stats = setup.model.run(
        setup.config.replications,
        |range: Range<usize>, rng: &mut R, acc: &mut Statistics| {
            for _ in range {
                let path = generator.next_path(rng);
                acc.add(setup.args.payoff(path.maximum()));
            }
            Ok(())
        },
    )?;
    Ok(estimate(&stats, setup.discount()))
}
