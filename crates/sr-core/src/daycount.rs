//! Day-count fractions.
//!
//! The workspace needs exactly two conventions: curves measure time from
//! their reference date on Actual/365 (Fixed), and simple forward-rate
//! accrual runs on Actual/360.  Both are free functions over
//! `chrono::NaiveDate`; there is no day-counter framework here.

use crate::Time;
use chrono::NaiveDate;

/// Actual/365 (Fixed) year fraction between two dates.
///
/// Signed: negative when `d2` precedes `d1`.
pub fn year_fraction_act365(d1: NaiveDate, d2: NaiveDate) -> Time {
    (d2 - d1).num_days() as Time / 365.0
}

/// Actual/360 year fraction between two dates.
///
/// Signed: negative when `d2` precedes `d1`.
pub fn year_fraction_act360(d1: NaiveDate, d2: NaiveDate) -> Time {
    (d2 - d1).num_days() as Time / 360.0
}
