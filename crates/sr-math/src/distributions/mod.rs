//! Probability distributions.
//!
//! Only the standard normal is needed here: its density and CDF back the
//! statistics tests, and the inverse CDF drives Gaussian variate generation.

pub mod normal;

pub use normal::{normal_cdf, normal_cdf_inverse, normal_pdf};
