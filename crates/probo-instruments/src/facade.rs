//! Option facade: one option, one engine, one market snapshot.

use crate::instrument::{PricingEngine, PricingResults};
use crate::option::VanillaOption;
use probo_core::errors::Result;
use probo_processes::MarketData;
use std::sync::Arc;

/// Binds an option, a pricing engine, and market data.
///
/// [`OptionFacade::price`] delegates to the engine and returns its result
/// unchanged. The facade holds no mutable state, so repeated calls with a
/// deterministic engine yield identical results.
#[derive(Debug, Clone)]
pub struct OptionFacade {
    option: VanillaOption,
    engine: Arc<dyn PricingEngine>,
    data: MarketData,
}

impl OptionFacade {
    /// Bind `option`, `engine`, and `data`.
    pub fn new(option: VanillaOption, engine: Arc<dyn PricingEngine>, data: MarketData) -> Self {
        Self {
            option,
            engine,
            data,
        }
    }

    /// Price the bound option with the bound engine.
    pub fn price(&self) -> Result<PricingResults> {
        self.option.price(&*self.engine, &self.data)
    }

    /// The bound option.
    pub fn option(&self) -> &VanillaOption {
        &self.option
    }

    /// The bound market data.
    pub fn market_data(&self) -> &MarketData {
        &self.data
    }

    /// The bound engine.
    pub fn engine(&self) -> &dyn PricingEngine {
        &*self.engine
    }
}
