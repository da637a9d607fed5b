//! # probo-processes
//!
//! The market-data snapshot consumed by every pricing engine and the
//! constant-parameter Black-Scholes process derived from it.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod black_scholes_process;
pub mod market_data;

pub use black_scholes_process::BlackScholesProcess;
pub use market_data::MarketData;
