//! The pricing-engine interface and its result type.
//!
//! An engine turns (option, market data) into [`PricingResults`]. Engines
//! are immutable values: their configuration is fixed at construction, so
//! one engine can serve concurrent pricing calls.

use crate::option::VanillaOptionArguments;
use probo_core::{errors::Result, Real};
use probo_processes::MarketData;
use std::collections::HashMap;

/// Results of pricing an option.
///
/// Contains the price, the standard error for simulation engines, and
/// optionally additional named results (e.g. "delta", "gamma", "theta").
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResults {
    /// Price (present value).
    pub price: Real,
    /// Standard error of the estimate (simulation engines only).
    pub standard_error: Option<Real>,
    /// Additional named results.
    pub additional_results: HashMap<String, Real>,
}

impl PricingResults {
    /// Create pricing results with just a price.
    pub fn from_price(price: Real) -> Self {
        Self {
            price,
            standard_error: None,
            additional_results: HashMap::new(),
        }
    }

    /// Attach the standard error of a simulated price.
    pub fn with_standard_error(mut self, standard_error: Real) -> Self {
        self.standard_error = Some(standard_error);
        self
    }

    /// Add a named result.
    pub fn with_result(mut self, key: impl Into<String>, value: Real) -> Self {
        self.additional_results.insert(key.into(), value);
        self
    }

    /// Look up a named result.
    pub fn result(&self, key: &str) -> Option<Real> {
        self.additional_results.get(key).copied()
    }
}

/// Base trait for all pricing engines.
pub trait PricingEngine: std::fmt::Debug + Send + Sync {
    /// Price the option described by `args` against `data`.
    fn calculate(&self, args: &VanillaOptionArguments, data: &MarketData) -> Result<PricingResults>;
}
