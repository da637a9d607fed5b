//! Option payoff hierarchy.
//!
//! Payoffs describe the terminal (or exercise) payoff of an option as a
//! function of the underlying asset price. They are pure functions of the
//! spot and never hold mutable state.

use probo_core::{ensure, errors::Error, errors::Result, Real};
use std::fmt;
use std::str::FromStr;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    /// Parse `"call"` or `"put"` (case-insensitive).
    fn from_str(tag: &str) -> Result<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(Error::UnsupportedPayoffType(format!(
                "expected \"call\" or \"put\", got {tag:?}"
            ))),
        }
    }
}

/// Base trait for option payoffs.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Compute the payoff given the underlying price at exercise/expiry.
    fn value(&self, price: Real) -> Real;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> String {
        self.name().to_string()
    }
}

/// A payoff depending on a strike price.
pub trait StrikedPayoff: Payoff {
    /// The strike price.
    fn strike(&self) -> Real;

    /// The option type, for payoffs that are a plain call or put.
    fn option_type(&self) -> Option<OptionType>;
}

/// Standard "plain vanilla" option payoff.
///
/// `payoff = max(φ(S − K), 0)` where `φ = +1` for Call, `−1` for Put.
#[derive(Debug, Clone)]
pub struct PlainVanillaPayoff {
    option_type: OptionType,
    strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff. The strike must be positive.
    pub fn new(option_type: OptionType, strike: Real) -> Result<Self> {
        ensure!(
            strike.is_finite() && strike > 0.0,
            "strike must be positive, got {strike}"
        );
        Ok(Self {
            option_type,
            strike,
        })
    }

    /// A call struck at `strike`.
    pub fn call(strike: Real) -> Result<Self> {
        Self::new(OptionType::Call, strike)
    }

    /// A put struck at `strike`.
    pub fn put(strike: Real) -> Result<Self> {
        Self::new(OptionType::Put, strike)
    }
}

impl Payoff for PlainVanillaPayoff {
    fn value(&self, price: Real) -> Real {
        (self.option_type.sign() * (price - self.strike)).max(0.0)
    }

    fn name(&self) -> &str {
        "Vanilla"
    }

    fn description(&self) -> String {
        format!("{} {} @ {}", self.name(), self.option_type, self.strike)
    }
}

impl StrikedPayoff for PlainVanillaPayoff {
    fn strike(&self) -> Real {
        self.strike
    }

    fn option_type(&self) -> Option<OptionType> {
        Some(self.option_type)
    }
}

/// Transformation applied to the spot by an [`ExoticPayoff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExoticKind {
    /// `S²`
    Squared,
    /// `√S`
    Sqrt,
    /// `1/S`
    Reciprocal,
}

impl ExoticKind {
    fn apply(self, price: Real) -> Real {
        match self {
            ExoticKind::Squared => price * price,
            ExoticKind::Sqrt => price.max(0.0).sqrt(),
            ExoticKind::Reciprocal => {
                if price > 0.0 {
                    price.recip()
                } else {
                    0.0
                }
            }
        }
    }
}

/// Call on a transformed spot: `max(g(S) − K, 0)`.
#[derive(Debug, Clone)]
pub struct ExoticPayoff {
    kind: ExoticKind,
    strike: Real,
}

impl ExoticPayoff {
    /// Create a new exotic payoff. The strike must be positive.
    pub fn new(kind: ExoticKind, strike: Real) -> Result<Self> {
        ensure!(
            strike.is_finite() && strike > 0.0,
            "strike must be positive, got {strike}"
        );
        Ok(Self { kind, strike })
    }

    /// The spot transformation.
    pub fn kind(&self) -> ExoticKind {
        self.kind
    }
}

impl Payoff for ExoticPayoff {
    fn value(&self, price: Real) -> Real {
        (self.kind.apply(price) - self.strike).max(0.0)
    }

    fn name(&self) -> &str {
        match self.kind {
            ExoticKind::Squared => "SquaredSpot",
            ExoticKind::Sqrt => "SqrtSpot",
            ExoticKind::Reciprocal => "ReciprocalSpot",
        }
    }

    fn description(&self) -> String {
        format!("{} @ {}", self.name(), self.strike)
    }
}

impl StrikedPayoff for ExoticPayoff {
    fn strike(&self) -> Real {
        self.strike
    }

    fn option_type(&self) -> Option<OptionType> {
        None
    }
}
