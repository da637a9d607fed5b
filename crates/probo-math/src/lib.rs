//! # probo-math
//!
//! Mathematical utilities: the standard normal and binomial distributions
//! (delegating to `statrs`), a mergeable statistics accumulator, and the
//! injectable random sources used by the Monte Carlo engines.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Random number generators.
pub mod random_numbers;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf, BinomialDistribution};
pub use random_numbers::{
    stream_seed, MersenneTwisterUniformRng, PseudoRandomRng, RandomSource, SeedableSource,
};
pub use statistics::Statistics;
