//! # sr-calibration
//!
//! The estimation and calibration stage of the shortrate pipeline: a
//! caller-owned fixing store, the historical volatility surface estimator,
//! the Monte-Carlo short-rate path simulator, and the Hull-White parameter
//! calibrator that ties the two together.
//!
//! The flow mirrors the production pipeline: fixings come out of a
//! [`FixingStore`], [`VolatilitySurface::estimate`] turns them into rolling
//! annualized volatilities, and [`calibrate_to_surface`] searches for the
//! `(a, sigma)` pair whose simulated volatilities best match the surface's
//! column means.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Hull-White parameter calibration against a surface or raw fixings.
pub mod calibrator;

/// Fixing points, per-index histories, and the shared fixing store.
pub mod fixings;

/// Monte-Carlo path generation and the model-implied volatility estimate.
pub mod simulation;

/// Rolling historical volatility surface estimation.
pub mod volatility;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use calibrator::{
    calibrate_to_fixings, calibrate_to_surface, CalibrationResult, CalibrationSettings,
    ModelParameters,
};
pub use fixings::{FixingHistory, FixingPoint, FixingQuery, FixingStore};
pub use simulation::{
    model_implied_volatility, simulate_paths, PathGenerator, SimulatedPath, SimulationConfig,
};
pub use volatility::{forward_fill_daily, VolatilitySurface, VolatilitySurfacePoint};
