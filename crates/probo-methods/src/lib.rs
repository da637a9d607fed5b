//! # probo-methods
//!
//! Numerical methods: the recombining binomial lattice with closed-form and
//! backward-induction pricing, and the Monte Carlo simulation framework.
//!
//! # Modules
//!
//! * [`lattice`] — binomial tree, time grid, European and American pricing
//! * [`monte_carlo`] — paths, path generation, chunked parallel model runner

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: binomial trees, backward induction.
pub mod lattice;

/// Monte Carlo simulation: path generation, chunked sampling.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{
    price_american, price_european, price_european_backward, BinomialTree, NodePayoff, TimeGrid,
};
pub use monte_carlo::{MonteCarloModel, Path, PathGenerator, SampleAccumulator};
