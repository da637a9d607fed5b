//! Recombining binomial tree for the Black-Scholes process.
//!
//! Up and down factors carry the drift:
//!
//! `u = exp(b·Δt + σ√Δt)`, `d = exp(b·Δt − σ√Δt)`, `b = r − q`
//!
//! so the risk-neutral up-probability `(e^{bΔt} − d)/(u − d)` reduces to
//! `1/(1 + e^{σ√Δt})`, independent of the drift. Node values are computed
//! in log space from the step counts. Outermost nodes of very wide trees
//! still overflow to `+∞`; the pricers value them at zero.

use probo_core::{ensure, errors::Error, errors::Result, DiscountFactor, Rate, Real, Time};
use probo_processes::BlackScholesProcess;

/// A recombining binomial tree approximating a [`BlackScholesProcess`].
///
/// The tree has `steps + 1` time layers, with layer `i` having `i + 1` nodes.
/// Node `(i, j)` represents the state after `j` up-moves and `i − j`
/// down-moves.
#[derive(Debug, Clone)]
pub struct BinomialTree {
    x0: Real,
    rate: Rate,
    dt: Time,
    steps: usize,
    drift_per_step: Real,
    step: Real,
    pu: Real,
    pd: Real,
}

impl BinomialTree {
    /// Build a tree with `steps` layers spanning `[0, expiry]`.
    ///
    /// Fails with [`Error::NumericDegeneracy`] when `σ√Δt` is zero, i.e.
    /// when the up and down factors coincide.
    pub fn new(process: &BlackScholesProcess, expiry: Time, steps: usize) -> Result<Self> {
        ensure!(steps >= 1, "steps must be at least 1, got {steps}");
        ensure!(
            expiry.is_finite() && expiry > 0.0,
            "expiry must be positive, got {expiry}"
        );
        let dt = expiry / steps as Real;
        let step = process.std_deviation(dt);
        if !(step > 0.0 && step.is_finite()) {
            return Err(Error::NumericDegeneracy(format!(
                "binomial tree needs σ√Δt > 0 (σ = {}, Δt = {dt}): up and down factors coincide",
                process.volatility()
            )));
        }
        let pu = 1.0 / (1.0 + step.exp());
        Ok(Self {
            x0: process.x0(),
            rate: process.rate(),
            dt,
            steps,
            drift_per_step: process.carry() * dt,
            step,
            pu,
            pd: 1.0 - pu,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Initial underlying value (spot price).
    pub fn x0(&self) -> Real {
        self.x0
    }

    /// Number of nodes at time step `i` (always `i + 1`).
    pub fn size(&self, i: usize) -> usize {
        i + 1
    }

    /// Up factor `u`.
    pub fn up(&self) -> Real {
        (self.drift_per_step + self.step).exp()
    }

    /// Down factor `d`.
    pub fn down(&self) -> Real {
        (self.drift_per_step - self.step).exp()
    }

    /// Risk-neutral probability of an up-move.
    pub fn probability_up(&self) -> Real {
        self.pu
    }

    /// Risk-neutral probability of a down-move.
    pub fn probability_down(&self) -> Real {
        self.pd
    }

    /// Underlying value at node `(i, j)`: `x0 · u^j · d^(i−j)`.
    #[inline]
    pub fn underlying(&self, i: usize, j: usize) -> Real {
        let moves = 2.0 * j as Real - i as Real;
        self.x0 * (i as Real * self.drift_per_step + moves * self.step).exp()
    }

    /// One-step discount factor `e^{−r·Δt}`.
    pub fn step_discount(&self) -> DiscountFactor {
        (-self.rate * self.dt).exp()
    }

    /// Discount factor over the whole tree, `e^{−r·T}`.
    pub fn discount(&self) -> DiscountFactor {
        (-self.rate * self.dt * self.steps as Real).exp()
    }
}
