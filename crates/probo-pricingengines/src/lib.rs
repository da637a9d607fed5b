//! # probo-pricingengines
//!
//! Pricing engines for single-asset options under Black-Scholes.
//!
//! ## Engines
//!
//! - [`AnalyticEuropeanEngine`] — Black-Scholes-Merton closed form with Greeks
//! - [`BinomialEngine`] — recombining lattice, European or American exercise
//! - [`MonteCarloEngine`] — simulation with the [`MonteCarloPricer`] family of
//!   variance-reduction estimators

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod binomial_engine;
pub mod monte_carlo;

pub use analytic_european_engine::{black_scholes_delta, black_scholes_merton, AnalyticEuropeanEngine};
pub use binomial_engine::{BinomialEngine, BinomialPricer};
pub use monte_carlo::{geometric_asian_price, MonteCarloConfig, MonteCarloEngine, MonteCarloPricer};
