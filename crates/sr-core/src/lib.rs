//! # sr-core
//!
//! Core types, error definitions, and shared containers for the shortrate
//! workspace: type aliases, the error enum with its `ensure!` / `fail!`
//! macros, day-count helpers, and the generic time-series container used by
//! the fixing store.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Day-count fractions (Act/365F and Act/360 free functions).
pub mod daycount;

/// Error types and the `ensure!` / `fail!` / `ensure_post!` macros.
pub mod errors;

/// Generic time-series container.
pub mod time_series;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the workspace.
pub type Real = f64;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor in [0, 1].
pub type DiscountFactor = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use daycount::{year_fraction_act360, year_fraction_act365};
pub use errors::{Error, Result};
pub use time_series::TimeSeries;
