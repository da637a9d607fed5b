//! # probo-instruments
//!
//! Option payoffs, the single-asset option contract, the
//! [`PricingEngine`] interface every engine implements, and the
//! [`OptionFacade`] that binds an option, an engine, and market data.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod facade;
pub mod instrument;
pub mod option;
pub mod payoff;

pub use facade::OptionFacade;
pub use instrument::{PricingEngine, PricingResults};
pub use option::{VanillaOption, VanillaOptionArguments};
pub use payoff::{ExoticKind, ExoticPayoff, OptionType, Payoff, PlainVanillaPayoff, StrikedPayoff};
