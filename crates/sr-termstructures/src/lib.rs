//! # sr-termstructures
//!
//! Index tenors and the forward curves built on top of them: a trait for
//! discount-factor queries, a flat curve for testing and model setup, and
//! a deposit-strip curve bootstrapped from simulated rate points.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Deposit-strip curve bootstrapped from dated simple rates.
pub mod deposit_strip;

/// Flat continuously-compounded forward curve.
pub mod flat_forward;

/// The forward-curve query trait.
pub mod forward_curve;

/// Money-market index tenors.
pub mod tenor;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use deposit_strip::DepositStripCurve;
pub use flat_forward::FlatForwardCurve;
pub use forward_curve::ForwardCurve;
pub use tenor::IndexTenor;
