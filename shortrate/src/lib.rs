//! # shortrate
//!
//! Calibrates a one-factor Hull-White short-rate model to the realized
//! volatility of a money-market index and projects floating-rate annuity
//! payments along simulated paths.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `sr-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! shortrate = "0.1"
//! ```
//!
//! ```rust
//! use chrono::NaiveDate;
//! use shortrate::prelude::*;
//!
//! let store = FixingStore::new();
//! let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! store.add_fixing("EURIBOR", IndexTenor::M6, date, 3.9);
//! assert_eq!(store.len(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use sr_core as core;

/// Mathematical utilities: statistics, optimization, RNG.
pub use sr_math as math;

/// Forward-curve implementations and index tenors.
pub use sr_termstructures as termstructures;

/// Stochastic process definitions.
pub use sr_processes as processes;

/// Fixing storage, volatility estimation, and model calibration.
pub use sr_calibration as calibration;

/// Payment schedules and annuity projection.
pub use sr_cashflows as cashflows;

/// The main types and entry points in one import.
pub mod prelude {
    pub use crate::calibration::{
        calibrate_to_fixings, calibrate_to_surface, forward_fill_daily, model_implied_volatility,
        simulate_paths, CalibrationResult, CalibrationSettings, FixingHistory, FixingPoint,
        FixingQuery, FixingStore, ModelParameters, SimulatedPath, SimulationConfig,
        VolatilitySurface, VolatilitySurfacePoint,
    };
    pub use crate::cashflows::{monthly_schedule, project_annuity, PaymentScheduleEntry};
    pub use crate::core::{Error, Rate, Real, Result, Time, Volatility};
    pub use crate::math::optimization::{EndCriteria, EndCriteriaType};
    pub use crate::math::InverseCumulativeNormalRng;
    pub use crate::processes::{HullWhiteProcess, StochasticProcess1D};
    pub use crate::termstructures::{DepositStripCurve, FlatForwardCurve, ForwardCurve, IndexTenor};
}
