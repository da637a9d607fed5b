//! Monte Carlo simulation framework.
//!
//! # Overview
//!
//! * [`Path`] — a single realisation of the process (times + values)
//! * [`PathGenerator`] — generates sample paths of a [`BlackScholesProcess`]
//! * [`SampleAccumulator`] — per-chunk state that can be merged
//! * [`MonteCarloModel`] — splits the sample into chunks, runs them on
//!   independent random streams, and merges the results in chunk order
//!
//! The chunk layout depends only on the sample size and the chunk size, and
//! chunk `c` always draws from the stream seeded with
//! `stream_seed(seed, c)`. Results are therefore identical whether the
//! chunks run sequentially or on the rayon pool.

use crate::lattice::TimeGrid;
use probo_core::{ensure, errors::Result, CancellationToken, Real, Time};
use probo_math::{stream_seed, RandomSource, SeedableSource, Statistics};
use probo_processes::BlackScholesProcess;
use rayon::prelude::*;
use std::ops::Range;
use tracing::trace;

// ─── Path ─────────────────────────────────────────────────────────────────────

/// A single sample path: a sequence of time-value pairs.
#[derive(Debug, Clone)]
pub struct Path {
    times: Vec<Time>,
    values: Vec<Real>,
}

impl Path {
    /// Number of time steps (= len − 1).
    pub fn steps(&self) -> usize {
        self.values.len() - 1
    }

    /// The final value.
    pub fn back(&self) -> Real {
        self.values[self.values.len() - 1]
    }

    /// The initial value.
    pub fn front(&self) -> Real {
        self.values[0]
    }

    /// Length of the path (number of points including initial).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Time points, starting at 0.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Process values, starting at the spot.
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// Arithmetic mean of all points, including the initial one.
    pub fn arithmetic_average(&self) -> Real {
        self.values.iter().sum::<Real>() / self.values.len() as Real
    }

    /// Geometric mean of all points, including the initial one.
    pub fn geometric_average(&self) -> Real {
        let log_sum: Real = self.values.iter().map(|v| v.ln()).sum();
        (log_sum / self.values.len() as Real).exp()
    }

    /// Largest value along the path.
    pub fn maximum(&self) -> Real {
        self.values.iter().copied().fold(Real::NEG_INFINITY, Real::max)
    }
}

// ─── PathGenerator ────────────────────────────────────────────────────────────

/// Generates sample paths of a Black-Scholes process on a uniform grid.
///
/// The generator holds no random state: every call draws from the source it
/// is given, so a single generator can be shared by all chunks.
#[derive(Debug, Clone)]
pub struct PathGenerator<'a> {
    process: &'a BlackScholesProcess,
    grid: TimeGrid,
}

impl<'a> PathGenerator<'a> {
    /// Create a path generator over `[0, maturity]` with `steps` steps.
    pub fn new(process: &'a BlackScholesProcess, maturity: Time, steps: usize) -> Result<Self> {
        Ok(Self {
            process,
            grid: TimeGrid::uniform(maturity, steps)?,
        })
    }

    /// The time grid.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Generate one sample path, drawing one normal per step.
    pub fn next_path<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Path {
        let dt = self.grid.dt();
        let mut values = Vec::with_capacity(self.grid.size());
        let mut x = self.process.x0();
        values.push(x);
        for _ in 0..self.grid.steps() {
            x = self.process.evolve(x, dt, rng.next_normal());
            values.push(x);
        }
        Path {
            times: self.grid.times().to_vec(),
            values,
        }
    }
}

// ─── Accumulators ─────────────────────────────────────────────────────────────

/// Per-chunk sample state.
///
/// `merge` must be associative; the model always merges chunks in
/// ascending chunk order.
pub trait SampleAccumulator: Default + Send {
    /// Fold `other` into `self`.
    fn merge(&mut self, other: Self);
}

impl SampleAccumulator for Statistics {
    fn merge(&mut self, other: Self) {
        Statistics::merge(self, &other);
    }
}

// ─── MonteCarloModel ──────────────────────────────────────────────────────────

/// A Monte Carlo simulation orchestrator.
///
/// Splits `units` sample units into chunks of `chunk_size`, hands each chunk
/// its own random stream and an empty accumulator, and merges the chunk
/// accumulators in order.
#[derive(Debug, Clone)]
pub struct MonteCarloModel {
    seed: u64,
    chunk_size: usize,
    parallel: bool,
    cancellation: Option<CancellationToken>,
}

impl MonteCarloModel {
    /// Create a new Monte Carlo model.
    pub fn new(seed: u64, chunk_size: usize, parallel: bool) -> Result<Self> {
        ensure!(chunk_size >= 1, "chunk_size must be at least 1, got {chunk_size}");
        Ok(Self {
            seed,
            chunk_size,
            parallel,
            cancellation: None,
        })
    }

    /// Check `token` before every chunk.
    pub fn with_cancellation(mut self, token: Option<CancellationToken>) -> Self {
        self.cancellation = token;
        self
    }

    /// Number of chunks needed for `units` sample units.
    pub fn chunks(&self, units: usize) -> usize {
        units.div_ceil(self.chunk_size)
    }

    /// Run `units` sample units.
    ///
    /// `sample` receives the global index range of the chunk, the chunk's
    /// random stream, and the chunk's accumulator.
    pub fn run<R, A, F>(&self, units: usize, sample: F) -> Result<A>
    where
        R: SeedableSource,
        A: SampleAccumulator,
        F: Fn(Range<usize>, &mut R, &mut A) -> Result<()> + Sync,
    {
        ensure!(units >= 1, "sample size must be at least 1, got {units}");
        let n_chunks = self.chunks(units);

        let run_chunk = |chunk: usize| -> Result<A> {
            if let Some(token) = &self.cancellation {
                token.check()?;
            }
            let start = chunk * self.chunk_size;
            let end = (start + self.chunk_size).min(units);
            let mut rng = R::from_seed(stream_seed(self.seed, chunk as u64));
            let mut acc = A::default();
            sample(start..end, &mut rng, &mut acc)?;
            trace!(chunk, start, end, "monte carlo chunk done");
            Ok(acc)
        };

        let partials: Vec<A> = if self.parallel && n_chunks > 1 {
            (0..n_chunks).into_par_iter().map(run_chunk).collect::<Result<_>>()?
        } else {
            (0..n_chunks).map(run_chunk).collect::<Result<_>>()?
        };

        let mut total = A::default();
        for partial in partials {
            total.merge(partial);
        }
        Ok(total)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use probo_core::errors::Error;
    use probo_math::{MersenneTwisterUniformRng, PseudoRandomRng};
    use probo_processes::MarketData;

    fn process() -> BlackScholesProcess {
        BlackScholesProcess::new(&MarketData::new(100.0, 0.05, 0.20, 0.0).unwrap())
    }

    #[test]
    fn path_generator_produces_positive_gbm() {
        let process = process();
        let gen = PathGenerator::new(&process, 1.0, 252).unwrap();
        let mut rng = PseudoRandomRng::new(12345);
        for _ in 0..100 {
            let path = gen.next_path(&mut rng);
            assert_eq!(path.len(), 253);
            assert!((path.front() - 100.0).abs() < 1e-12);
            assert!((path.times()[252] - 1.0).abs() < 1e-12);
            // GBM stays positive
            for &v in path.values() {
                assert!(v > 0.0, "GBM path went non-positive: {v}");
            }
            assert!(path.maximum() >= path.back());
            assert!(path.arithmetic_average() >= path.geometric_average() - 1e-12);
        }
    }

    #[test]
    fn terminal_mean_matches_forward() {
        let process = process();
        let gen = PathGenerator::new(&process, 1.0, 1).unwrap();
        let model = MonteCarloModel::new(7, 1_000, true).unwrap();
        let stats: Statistics = model
            .run(50_000, |range, rng: &mut MersenneTwisterUniformRng, acc: &mut Statistics| {
                for _ in range {
                    acc.add(gen.next_path(rng).back());
                }
                Ok(())
            })
            .unwrap();
        let mean = stats.mean().unwrap();
        let se = stats.error_estimate().unwrap();
        assert_eq!(stats.samples(), 50_000);
        assert!((mean - process.forward(1.0)).abs() < 4.0 * se);
    }

    #[test]
    fn parallel_and_sequential_runs_agree() {
        let process = process();
        let gen = PathGenerator::new(&process, 1.0, 4).unwrap();
        let sample = |range: Range<usize>, rng: &mut PseudoRandomRng, acc: &mut Statistics| {
            for _ in range {
                acc.add(gen.next_path(rng).back());
            }
            Ok(())
        };
        let par: Statistics = MonteCarloModel::new(3, 100, true)
            .unwrap()
            .run(1_050, sample)
            .unwrap();
        let seq: Statistics = MonteCarloModel::new(3, 100, false)
            .unwrap()
            .run(1_050, sample)
            .unwrap();
        assert_eq!(par.samples(), 1_050);
        assert_eq!(par.mean(), seq.mean());
        assert_eq!(par.variance(), seq.variance());
    }

    #[test]
    fn chunk_ranges_cover_sample() {
        let model = MonteCarloModel::new(1, 64, true).unwrap();
        assert_eq!(model.chunks(1), 1);
        assert_eq!(model.chunks(64), 1);
        assert_eq!(model.chunks(65), 2);
        let stats: Statistics = model
            .run(200, |range, _rng: &mut PseudoRandomRng, acc: &mut Statistics| {
                for i in range {
                    acc.add(i as Real);
                }
                Ok(())
            })
            .unwrap();
        assert_eq!(stats.samples(), 200);
        assert!((stats.mean().unwrap() - 99.5).abs() < 1e-12);
    }

    #[test]
    fn cancelled_before_first_chunk() {
        let token = CancellationToken::new();
        token.cancel();
        let model = MonteCarloModel::new(1, 10, false)
            .unwrap()
            .with_cancellation(Some(token));
        let result: Result<Statistics> =
            model.run(100, |_range, _rng: &mut PseudoRandomRng, _acc| Ok(()));
        assert_eq!(result.unwrap_err(), Error::Cancelled);
    }

    #[test]
    fn empty_sample_rejected() {
        let model = MonteCarloModel::new(1, 10, false).unwrap();
        let result: Result<Statistics> =
            model.run(0, |_range, _rng: &mut PseudoRandomRng, _acc| Ok(()));
        assert!(matches!(result, Err(Error::Precondition(_))));
        assert!(MonteCarloModel::new(1, 0, true).is_err());
    }
}
