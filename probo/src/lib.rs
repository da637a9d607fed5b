//! # probo
//!
//! Prices single-asset options under the Black-Scholes model with three
//! independent methods: the closed-form formula, a binomial lattice
//! (European and American exercise), and Monte Carlo simulation with
//! variance reduction.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `probo-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use probo::instruments::{OptionFacade, OptionType, VanillaOption};
//! use probo::pricingengines::{
//!     AnalyticEuropeanEngine, BinomialEngine, BinomialPricer, MonteCarloConfig,
//!     MonteCarloEngine, MonteCarloPricer,
//! };
//! use probo::processes::MarketData;
//! use std::sync::Arc;
//!
//! let call = VanillaOption::vanilla(OptionType::Call, 40.0, 0.25)?;
//! let data = MarketData::new(41.0, 0.08, 0.30, 0.0)?;
//!
//! let analytic = OptionFacade::new(
//!     call.clone(),
//!     Arc::new(AnalyticEuropeanEngine::new(OptionType::Call)),
//!     data,
//! );
//! let american = OptionFacade::new(
//!     call.clone(),
//!     Arc::new(BinomialEngine::new(200, BinomialPricer::American)?),
//!     data,
//! );
//! let simulated = OptionFacade::new(
//!     call,
//!     Arc::new(MonteCarloEngine::new(
//!         MonteCarloConfig::new(10_000, 1)?,
//!         MonteCarloPricer::Antithetic,
//!     )?),
//!     data,
//! );
//!
//! let bs = analytic.price()?.price;
//! assert!((bs - 3.399).abs() < 1e-3);
//! assert!((american.price()?.price - bs).abs() < 0.02);
//!
//! let mc = simulated.price()?;
//! assert!(mc.standard_error.is_some());
//! # Ok::<(), probo::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use probo_core as core;

/// Mathematical utilities: distributions, statistics, RNG.
pub use probo_math as math;

/// Market data and the Black-Scholes process.
pub use probo_processes as processes;

/// Payoffs, options, the engine interface, and the option facade.
pub use probo_instruments as instruments;

/// Numerical methods (binomial lattice, Monte Carlo).
pub use probo_methods as methods;

/// Pricing engines.
pub use probo_pricingengines as pricingengines;
