//! Single-asset option contract.
//!
//! An option is a striked payoff plus a time to expiry in years. The
//! exercise style is not part of the contract: the engine decides whether
//! it values European or American exercise.

use crate::instrument::{PricingEngine, PricingResults};
use crate::payoff::{OptionType, PlainVanillaPayoff, StrikedPayoff};
use probo_core::{ensure, errors::Result, Real, Time};
use probo_processes::MarketData;
use std::sync::Arc;

// ────────────────────────────────────────────────────────────────────────────
// Option arguments (sent to pricing engines)
// ────────────────────────────────────────────────────────────────────────────

/// Arguments needed for pricing a single-asset option.
#[derive(Debug, Clone)]
pub struct VanillaOptionArguments {
    /// The payoff.
    pub payoff: Arc<dyn StrikedPayoff>,
    /// Time to expiry in years.
    pub expiry: Time,
}

impl VanillaOptionArguments {
    /// The strike price.
    pub fn strike(&self) -> Real {
        self.payoff.strike()
    }

    /// Evaluate the payoff at `spot`.
    pub fn payoff(&self, spot: Real) -> Real {
        self.payoff.value(spot)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// VanillaOption
// ────────────────────────────────────────────────────────────────────────────

/// An option on a single underlying asset.
#[derive(Debug, Clone)]
pub struct VanillaOption {
    payoff: Arc<dyn StrikedPayoff>,
    expiry: Time,
}

impl VanillaOption {
    /// Create a new option. The expiry must be positive.
    pub fn new(payoff: Arc<dyn StrikedPayoff>, expiry: Time) -> Result<Self> {
        ensure!(
            expiry.is_finite() && expiry > 0.0,
            "expiry must be positive, got {expiry}"
        );
        ensure!(
            payoff.strike() > 0.0,
            "strike must be positive, got {}",
            payoff.strike()
        );
        Ok(Self { payoff, expiry })
    }

    /// Convenience: create a plain call/put.
    pub fn vanilla(option_type: OptionType, strike: Real, expiry: Time) -> Result<Self> {
        Self::new(
            Arc::new(PlainVanillaPayoff::new(option_type, strike)?),
            expiry,
        )
    }

    /// Time to expiry in years.
    pub fn expiry(&self) -> Time {
        self.expiry
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.payoff.strike()
    }

    /// Evaluate the payoff at `spot`.
    pub fn payoff(&self, spot: Real) -> Real {
        self.payoff.value(spot)
    }

    /// The payoff object.
    pub fn payoff_fn(&self) -> &dyn StrikedPayoff {
        &*self.payoff
    }

    /// Get the arguments for a pricing engine.
    pub fn arguments(&self) -> VanillaOptionArguments {
        VanillaOptionArguments {
            payoff: Arc::clone(&self.payoff),
            expiry: self.expiry,
        }
    }

    /// Price this option using the given engine.
    pub fn price(&self, engine: &dyn PricingEngine, data: &MarketData) -> Result<PricingResults> {
        engine.calculate(&self.arguments(), data)
    }
}
