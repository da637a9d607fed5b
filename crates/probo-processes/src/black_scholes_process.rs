//! Black-Scholes-Merton process with constant parameters.
//!
//! `dS/S = (r − q) dt + σ dW`
//!
//! where `r` is the risk-free rate, `q` is the continuous dividend yield,
//! and `σ` is the volatility, all flat over the life of the option.

use crate::market_data::MarketData;
use probo_core::{DiscountFactor, Rate, Real, Time, Volatility};

/// Risk-neutral geometric Brownian motion built from a [`MarketData`]
/// snapshot.
///
/// Closed-form solution: `S(t + Δt) = S(t) · exp((r − q − σ²/2)Δt + σ√Δt·Z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesProcess {
    x0: Real,
    rate: Rate,
    dividend: Rate,
    volatility: Volatility,
}

impl BlackScholesProcess {
    /// Create the process from a market snapshot.
    pub fn new(data: &MarketData) -> Self {
        let (x0, rate, volatility, dividend) = data.get_data();
        Self {
            x0,
            rate,
            dividend,
            volatility,
        }
    }

    /// Initial value of the process (the spot).
    pub fn x0(&self) -> Real {
        self.x0
    }

    /// Risk-free rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Dividend yield.
    pub fn dividend(&self) -> Rate {
        self.dividend
    }

    /// Volatility.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// Cost of carry `r − q`.
    pub fn carry(&self) -> Rate {
        self.rate - self.dividend
    }

    /// Drift of `ln S`: `r − q − σ²/2`.
    pub fn log_drift(&self) -> Real {
        self.carry() - 0.5 * self.volatility * self.volatility
    }

    /// Standard deviation of `ln S` over `dt`: `σ√dt`.
    pub fn std_deviation(&self, dt: Time) -> Real {
        self.volatility * dt.sqrt()
    }

    /// Exact step: advance `x` over `dt` driven by the standard normal `dw`.
    #[inline]
    pub fn evolve(&self, x: Real, dt: Time, dw: Real) -> Real {
        x * (self.log_drift() * dt + self.std_deviation(dt) * dw).exp()
    }

    /// Risk-free discount factor `e^{−r·t}`.
    pub fn discount(&self, t: Time) -> DiscountFactor {
        (-self.rate * t).exp()
    }

    /// Dividend discount factor `e^{−q·t}`.
    pub fn dividend_discount(&self, t: Time) -> DiscountFactor {
        (-self.dividend * t).exp()
    }

    /// Forward price `S·e^{(r−q)t}`.
    pub fn forward(&self, t: Time) -> Real {
        self.x0 * (self.carry() * t).exp()
    }
}

impl From<&MarketData> for BlackScholesProcess {
    fn from(data: &MarketData) -> Self {
        Self::new(data)
    }
}
