//! Lattice methods for option pricing.
//!
//! # Overview
//!
//! * [`BinomialTree`] — recombining binomial tree under the Black-Scholes
//!   process
//! * [`TimeGrid`] — grid of time points shared with the path generator
//! * [`price_european`] — closed-form expectation over the terminal layer
//! * [`price_european_backward`] / [`price_american`] — backward induction

pub mod binomial_tree;

pub use binomial_tree::BinomialTree;

use probo_core::{ensure, errors::Error, errors::Result, CancellationToken, Real, Time};
use probo_math::BinomialDistribution;
use rayon::prelude::*;

/// Layers with at least this many nodes are rolled back in parallel.
pub const PARALLEL_LAYER_THRESHOLD: usize = 4_096;

// ─── TimeGrid ─────────────────────────────────────────────────────────────────

/// A uniform grid of time points.
#[derive(Debug, Clone)]
pub struct TimeGrid {
    times: Vec<Time>,
    dt: Time,
}

impl TimeGrid {
    /// Create a uniform time grid from 0 to `end` with `steps` intervals.
    pub fn uniform(end: Time, steps: usize) -> Result<Self> {
        ensure!(steps >= 1, "steps must be at least 1, got {steps}");
        ensure!(
            end.is_finite() && end > 0.0,
            "grid end must be positive, got {end}"
        );
        let dt = end / steps as Real;
        let times = (0..=steps).map(|i| i as Real * dt).collect();
        Ok(Self { times, dt })
    }

    /// Number of time points (= steps + 1).
    pub fn size(&self) -> usize {
        self.times.len()
    }

    /// Number of steps (= time points − 1).
    pub fn steps(&self) -> usize {
        self.times.len() - 1
    }

    /// Time at index `i`.
    pub fn time(&self, i: usize) -> Time {
        self.times[i]
    }

    /// Time step between consecutive points.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Final time.
    pub fn end(&self) -> Time {
        self.times[self.times.len() - 1]
    }

    /// All time points.
    pub fn times(&self) -> &[Time] {
        &self.times
    }
}

// ─── Pricing ──────────────────────────────────────────────────────────────────

/// Payoff function `S → value` evaluated on tree nodes.
pub type NodePayoff<'a> = &'a (dyn Fn(Real) -> Real + Sync);

/// Price a European option as the discounted expectation over the
/// terminal layer.
///
/// Terminal node `j` (that is, `j` up-moves) is weighted by the binomial
/// probability mass of `j` successes in `steps` trials with probability
/// `p_up`. No recursion is needed; the result equals
/// [`price_european_backward`] up to rounding.
pub fn price_european(tree: &BinomialTree, payoff: NodePayoff<'_>) -> Result<Real> {
    let n = tree.steps();
    let dist = BinomialDistribution::new(tree.probability_up(), n as u64)?;
    let expectation: Real = (0..=n)
        .map(|j| match dist.pmf(j as u64) {
            w if w > 0.0 => w * node_payoff(tree, payoff, n, j),
            _ => 0.0,
        })
        .sum();
    finite(tree.discount() * expectation)
}

/// Price a European option by backward induction on a binomial tree.
pub fn price_european_backward(
    tree: &BinomialTree,
    payoff: NodePayoff<'_>,
    cancellation: Option<&CancellationToken>,
) -> Result<Real> {
    roll_back(tree, payoff, false, cancellation)
}

/// Price an American option by backward induction on a binomial tree.
///
/// Same as European backward induction, but every node takes the larger of
/// the discounted continuation value and the immediate-exercise payoff.
pub fn price_american(
    tree: &BinomialTree,
    payoff: NodePayoff<'_>,
    cancellation: Option<&CancellationToken>,
) -> Result<Real> {
    roll_back(tree, payoff, true, cancellation)
}

fn roll_back(
    tree: &BinomialTree,
    payoff: NodePayoff<'_>,
    early_exercise: bool,
    cancellation: Option<&CancellationToken>,
) -> Result<Real> {
    let n = tree.steps();
    let discount = tree.step_discount();
    let (pu, pd) = (tree.probability_up(), tree.probability_down());

    // Terminal values at maturity
    let mut values: Vec<Real> = (0..tree.size(n))
        .map(|j| node_payoff(tree, payoff, n, j))
        .collect();

    let node_value = |i: usize, j: usize, down: Real, up: Real| {
        let hold = discount * (pu * up + pd * down);
        if early_exercise {
            hold.max(node_payoff(tree, payoff, i, j))
        } else {
            hold
        }
    };

    for i in (0..n).rev() {
        if let Some(token) = cancellation {
            token.check()?;
        }
        if tree.size(i) >= PARALLEL_LAYER_THRESHOLD {
            values = (0..tree.size(i))
                .into_par_iter()
                .map(|j| node_value(i, j, values[j], values[j + 1]))
                .collect();
        } else {
            // values[j + 1] is still the next layer's value when node j is updated
            for j in 0..tree.size(i) {
                values[j] = node_value(i, j, values[j], values[j + 1]);
            }
            values.truncate(tree.size(i));
        }
    }

    finite(values[0])
}

/// Payoff at node `(i, j)`.
///
/// For large `σ√(T·steps)` the outermost nodes leave the `f64` range and
/// their payoff becomes `+∞`. Those nodes sit where the binomial mass has
/// long underflowed to zero, so they are valued at zero.
#[inline]
fn node_payoff(tree: &BinomialTree, payoff: NodePayoff<'_>, i: usize, j: usize) -> Real {
    let value = payoff(tree.underlying(i, j));
    if value == Real::INFINITY {
        0.0
    } else {
        value
    }
}

fn finite(price: Real) -> Result<Real> {
    if price.is_finite() {
        Ok(price)
    } else {
        Err(Error::NumericDegeneracy(format!(
            "lattice produced a non-finite price ({price})"
        )))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
