//! Immutable market snapshot.

use probo_core::{ensure, errors::Result, Rate, Real, Volatility};

/// Spot, risk-free rate, volatility, and continuous dividend yield.
///
/// Validated on construction and immutable afterwards; engines read it
/// through [`MarketData::get_data`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketData {
    spot: Real,
    rate: Rate,
    volatility: Volatility,
    dividend: Rate,
}

impl MarketData {
    /// Create a snapshot.
    ///
    /// Requires `spot > 0`, `volatility ≥ 0`, `dividend ≥ 0`, and every
    /// input finite. A zero volatility is accepted; engines that cannot
    /// handle it report a numeric degeneracy.
    pub fn new(spot: Real, rate: Rate, volatility: Volatility, dividend: Rate) -> Result<Self> {
        ensure!(
            spot.is_finite() && spot > 0.0,
            "spot must be positive, got {spot}"
        );
        ensure!(rate.is_finite(), "rate must be finite, got {rate}");
        ensure!(
            volatility.is_finite() && volatility >= 0.0,
            "volatility must be non-negative, got {volatility}"
        );
        ensure!(
            dividend.is_finite() && dividend >= 0.0,
            "dividend must be non-negative, got {dividend}"
        );
        Ok(Self {
            spot,
            rate,
            volatility,
            dividend,
        })
    }

    /// `(spot, rate, volatility, dividend)`.
    pub fn get_data(&self) -> (Real, Rate, Volatility, Rate) {
        (self.spot, self.rate, self.volatility, self.dividend)
    }

    /// Current price of the underlying.
    pub fn spot(&self) -> Real {
        self.spot
    }

    /// Continuously-compounded risk-free rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Annualised volatility.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// Continuous dividend yield.
    pub fn dividend(&self) -> Rate {
        self.dividend
    }
}
