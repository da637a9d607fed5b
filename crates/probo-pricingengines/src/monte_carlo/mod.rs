//! Monte Carlo engine and its pricer strategies.
//!
//! Every strategy returns a price together with the standard error of the
//! same sample. Runs with fewer than two sample units report no standard
//! error. Replications are split into chunks by
//! [`MonteCarloModel`]; each chunk draws from its own random stream, so a
//! fixed seed reproduces the price exactly, with or without parallelism.
//!
//! | Pricer | Sample unit | Standard error |
//! |---|---|---|
//! | [`MonteCarloPricer::Naive`] | one terminal draw | `sd / √n` |
//! | [`MonteCarloPricer::Antithetic`] | a `(z, −z)` pair | over pair averages |
//! | [`MonteCarloPricer::Stratified`] | two adjacent strata | from within-pair differences |
//! | [`MonteCarloPricer::ControlVariate`] | one path with delta hedge | `sd / √n` |
//! | [`MonteCarloPricer::ArithmeticAsian`] | one path | `sd / √n` |
//! | [`MonteCarloPricer::Lookback`] | one path | `sd / √n` |

mod antithetic;
mod asian;
mod control_variate;
mod lookback;
mod naive;
mod stratified;

pub use asian::geometric_asian_price;

use probo_core::{ensure, errors::Result, CancellationToken, Real};
use probo_instruments::{PricingEngine, PricingResults, VanillaOptionArguments};
use probo_math::{PseudoRandomRng, SeedableSource, Statistics};
use probo_methods::MonteCarloModel;
use probo_processes::{BlackScholesProcess, MarketData};
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Sample size, discretisation, and execution settings of a Monte Carlo run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    /// Number of replications (terminal values or paths).
    pub replications: usize,
    /// Number of time steps per simulated path.
    pub time_steps: usize,
    /// Base seed of the random streams.
    pub seed: u64,
    /// Replications per chunk; each chunk owns one random stream.
    pub chunk_size: usize,
    /// Run chunks on the rayon pool.
    pub parallel: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            replications: 10_000,
            time_steps: 1,
            seed: 42,
            chunk_size: 1_024,
            parallel: true,
        }
    }
}

impl MonteCarloConfig {
    /// Configuration with `replications` and `time_steps`, other settings at
    /// their defaults.
    pub fn new(replications: usize, time_steps: usize) -> Result<Self> {
        let config = Self {
            replications,
            time_steps,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the number of replications.
    pub fn with_replications(mut self, replications: usize) -> Self {
        self.replications = replications;
        self
    }

    /// Set the number of time steps.
    pub fn with_time_steps(mut self, time_steps: usize) -> Self {
        self.time_steps = time_steps;
        self
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Enable or disable parallel chunk execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that every count is at least 1.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.replications >= 1,
            "replications must be at least 1, got {}",
            self.replications
        );
        ensure!(
            self.time_steps >= 1,
            "time_steps must be at least 1, got {}",
            self.time_steps
        );
        ensure!(
            self.chunk_size >= 1,
            "chunk_size must be at least 1, got {}",
            self.chunk_size
        );
        Ok(())
    }
}

// ─── Pricer strategies ────────────────────────────────────────────────────────

/// The Monte Carlo estimator used by a [`MonteCarloEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonteCarloPricer {
    /// One standard-normal draw per replication, exact terminal value.
    Naive,
    /// Each draw `z` is paired with `−z`; `⌈n/2⌉` pairs.
    ///
    /// An odd replication count is rounded up to whole pairs, so `n` odd
    /// simulates `n + 1` terminal values.
    Antithetic,
    /// One uniform per equal-width stratum of `(0, 1)`, mapped through the
    /// inverse normal cdf.
    Stratified,
    /// Multi-step paths with the discrete Black-Scholes delta hedge as
    /// control, `β = −1`.
    ControlVariate,
    /// Vanilla payoff on the arithmetic path average. Optionally uses the
    /// geometric-average closed form as a control variate.
    ArithmeticAsian {
        /// Correct with the geometric-average Asian price.
        geometric_control: bool,
    },
    /// Payoff applied to the path maximum.
    Lookback,
}

/// Everything a pricer strategy needs for one run.
pub(crate) struct McSetup<'a> {
    pub args: &'a VanillaOptionArguments,
    pub process: BlackScholesProcess,
    pub config: &'a MonteCarloConfig,
    pub model: MonteCarloModel,
}

impl McSetup<'_> {
    /// Discount factor from expiry to today.
    pub fn discount(&self) -> Real {
        self.process.discount(self.args.expiry)
    }
}

/// `(mean, standard error)` of `stats`, both scaled by `scale`. The
/// standard error is `None` below two samples.
pub(crate) fn estimate(stats: &Statistics, scale: Real) -> (Real, Option<Real>) {
    (
        scale * stats.mean().unwrap_or(0.0),
        stats.error_estimate().map(|se| scale * se),
    )
}

// ─── Engine ───────────────────────────────────────────────────────────────────

/// Monte Carlo pricing engine.
///
/// `R` is the random source each chunk is built from; it defaults to
/// [`PseudoRandomRng`].
pub struct MonteCarloEngine<R = PseudoRandomRng> {
    config: MonteCarloConfig,
    pricer: MonteCarloPricer,
    cancellation: Option<CancellationToken>,
    source: PhantomData<fn() -> R>,
}

impl MonteCarloEngine<PseudoRandomRng> {
    /// Create an engine drawing from [`PseudoRandomRng`] streams.
    pub fn new(config: MonteCarloConfig, pricer: MonteCarloPricer) -> Result<Self> {
        Self::with_source(config, pricer)
    }
}

impl<R: SeedableSource> MonteCarloEngine<R> {
    /// Create an engine drawing from streams of `R`.
    pub fn with_source(config: MonteCarloConfig, pricer: MonteCarloPricer) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            pricer,
            cancellation: None,
            source: PhantomData,
        })
    }

    /// Check `token` before every chunk.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// The run configuration.
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// The estimator.
    pub fn pricer(&self) -> MonteCarloPricer {
        self.pricer
    }
}

impl<R> fmt::Debug for MonteCarloEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonteCarloEngine")
            .field("config", &self.config)
            .field("pricer", &self.pricer)
            .field("source", &std::any::type_name::<R>())
            .finish()
    }
}

impl<R: SeedableSource> PricingEngine for MonteCarloEngine<R> {
    fn calculate(&self, args: &VanillaOptionArguments, data: &MarketData) -> Result<PricingResults> {
        let config = &self.config;
        let model = MonteCarloModel::new(config.seed, config.chunk_size, config.parallel)?
            .with_cancellation(self.cancellation.clone());
        let setup = McSetup {
            args,
            process: BlackScholesProcess::new(data),
            config,
            model,
        };

        let (price, standard_error) = match self.pricer {
            MonteCarloPricer::Naive => naive::price::<R>(&setup)?,
            MonteCarloPricer::Antithetic => antithetic::price::<R>(&setup)?,
            MonteCarloPricer::Stratified => stratified::price::<R>(&setup)?,
            MonteCarloPricer::ControlVariate => control_variate::price::<R>(&setup)?,
            MonteCarloPricer::ArithmeticAsian { geometric_control } => {
                asian::price::<R>(&setup, geometric_control)?
            }
            MonteCarloPricer::Lookback => lookback::price::<R>(&setup)?,
        };
        debug!(
            pricer = ?self.pricer,
            replications = config.replications,
            time_steps = config.time_steps,
            seed = config.seed,
            price,
            standard_error = ?standard_error,
            "monte carlo price"
        );

        let results = PricingResults::from_price(price);
        Ok(match standard_error {
            Some(se) => results.with_standard_error(se),
            None => results,
        })
    }
}
