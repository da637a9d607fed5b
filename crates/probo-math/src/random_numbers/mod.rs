//! Random number generators.
//!
//! Pricers never touch a process-wide generator: they draw from a
//! [`RandomSource`] handed to them. Sources that can be rebuilt from a seed
//! implement [`SeedableSource`]; the Monte Carlo model derives one
//! independent stream per chunk of replications with [`stream_seed`].
//!
//! Two sources are provided:
//! * [`MersenneTwisterUniformRng`] — MT19937-64 (`rand_mt`), normals by
//!   inverse transform.
//! * [`PseudoRandomRng`] — `rand`'s `StdRng`, normals by the ziggurat
//!   sampler of `rand_distr`.

use crate::distributions::normal::normal_cdf_inverse;
use probo_core::Real;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use rand_mt::Mt19937GenRand64;

/// A stream of uniform and standard-normal deviates.
pub trait RandomSource: Send {
    /// Next uniform deviate in the open interval `(0, 1)`.
    fn next_uniform(&mut self) -> Real;

    /// Next standard-normal deviate.
    fn next_normal(&mut self) -> Real;
}

/// A [`RandomSource`] that can be reconstructed deterministically from a
/// 64-bit seed.
pub trait SeedableSource: RandomSource + Sized {
    /// Build the source from `seed`.
    fn from_seed(seed: u64) -> Self;
}

/// Seed of the `stream`-th independent sub-stream of `seed`.
///
/// SplitMix64 finaliser over `seed` and the stream index, so neighbouring
/// streams start from unrelated states.
pub fn stream_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed
        .wrapping_add(stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // top 53 bits
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

impl RandomSource for MersenneTwisterUniformRng {
    fn next_uniform(&mut self) -> Real {
        loop {
            let u = self.next_real();
            if u > 0.0 {
                break u;
            }
        }
    }

    fn next_normal(&mut self) -> Real {
        let u = self.next_uniform();
        // u is in (0, 1), so the inverse is always defined
        normal_cdf_inverse(u).unwrap_or(0.0)
    }
}

impl SeedableSource for MersenneTwisterUniformRng {
    fn from_seed(seed: u64) -> Self {
        Self::new(seed)
    }
}

/// `StdRng`-backed source with ziggurat normal sampling.
pub struct PseudoRandomRng {
    inner: StdRng,
}

impl PseudoRandomRng {
    /// Create a generator initialised with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for PseudoRandomRng {
    fn next_uniform(&mut self) -> Real {
        loop {
            let u: Real = self.inner.gen();
            if u > 0.0 {
                break u;
            }
        }
    }

    fn next_normal(&mut self) -> Real {
        StandardNormal.sample(&mut self.inner)
    }
}

impl SeedableSource for PseudoRandomRng {
    fn from_seed(seed: u64) -> Self {
        Self::new(seed)
    }
}
