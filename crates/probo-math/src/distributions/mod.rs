//! Probability distributions.
//!
//! The standard normal (pdf, cdf, inverse cdf) and the binomial
//! distribution, delegating to the `statrs` crate where appropriate.

pub mod binomial;
pub mod normal;

pub use binomial::BinomialDistribution;
pub use normal::{normal_cdf, normal_cdf_inverse, normal_pdf};
