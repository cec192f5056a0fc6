//! # sr-math
//!
//! Mathematical machinery for the calibration pipeline: the `Array` newtype
//! over nalgebra, the standard-normal distribution, Mersenne-Twister random
//! number generation, statistics accumulators with the rolling-window
//! estimator, and the constrained BFGS optimizer.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// 1D array newtype over `nalgebra::DVector`.
pub mod array;

/// Probability distributions.
pub mod distributions;

/// Optimization: cost functions, constraints, end criteria, BFGS.
pub mod optimization;

/// Random number generators.
pub mod random_numbers;

/// Statistics accumulators and rolling-window estimators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use array::Array;
pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use random_numbers::{InverseCumulativeNormalRng, MersenneTwisterUniformRng};
pub use statistics::{rolling_std, Statistics};
