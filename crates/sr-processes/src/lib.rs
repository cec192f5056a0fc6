//! # sr-processes
//!
//! One-dimensional stochastic processes for the short rate. The trait
//! describes a process through drift and diffusion with overridable
//! conditional moments; the Hull-White implementation fits itself to a
//! forward curve and supplies the exact moments in closed form.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Hull-White (extended Vasicek) short-rate process.
pub mod hull_white;

/// The one-dimensional process trait.
pub mod stochastic_process;

pub use hull_white::HullWhiteProcess;
pub use stochastic_process::StochasticProcess1D;
