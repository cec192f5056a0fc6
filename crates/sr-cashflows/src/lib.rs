//! Payment schedules and annuity projection.
//!
//! A simulated rate path is bootstrapped into a [`DepositStripCurve`]
//! (via `sr-termstructures`) and then amortized month by month: each
//! payment accrues at the 1-month forward rate observed on its own
//! payment date, and the installment is recomputed from the months
//! still outstanding. See [`project_annuity`].
//!
//! [`DepositStripCurve`]: sr_termstructures::DepositStripCurve

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod annuity;
pub mod schedule;

pub use annuity::{project_annuity, PaymentScheduleEntry};
pub use schedule::monthly_schedule;
