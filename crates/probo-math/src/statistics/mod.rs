//! Sample statistics accumulator.
//!
//! [`Statistics`] keeps a running count, mean, and sum of squared
//! deviations. Two accumulators built over disjoint samples can be
//! combined with [`Statistics::merge`], so Monte Carlo replications can be
//! reduced chunk by chunk on independent workers.

use probo_core::Real;

/// Incremental statistics accumulator.
///
/// Computes count, mean, variance, standard deviation, and error estimate.
#[derive(Debug, Clone)]
pub struct Statistics {
    count: usize,
    mean: Real,
    m2: Real,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Add a single sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as Real;
        self.m2 += delta * (x - self.mean);
    }

    /// Fold the samples of `other` into `self`.
    ///
    /// The result does not depend on how the samples were split, up to
    /// rounding; merging in a fixed order makes it bit-for-bit reproducible.
    pub fn merge(&mut self, other: &Statistics) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let n_a = self.count as Real;
        let n_b = other.count as Real;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;
        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Sample mean.  Returns `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        if self.count == 0 {
            None
        } else {
            Some(self.mean)
        }
    }

    /// Unbiased (Bessel-corrected) variance.  Returns `None` for fewer
    /// than 2 samples.
    pub fn variance(&self) -> Option<Real> {
        if self.count < 2 {
            return None;
        }
        Some((self.m2 / (self.count as Real - 1.0)).max(0.0))
    }

    /// Standard deviation.  Returns `None` for fewer than 2 samples.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(|v| v.sqrt())
    }

    /// Standard error of the mean, `std_dev / √n`.
    pub fn error_estimate(&self) -> Option<Real> {
        self.std_dev().map(|s| s / (self.count as Real).sqrt())
    }
}
