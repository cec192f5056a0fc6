//! Flat forward curve.
//!
//! The simplest curve there is, a single continuously-compounded rate for
//! all maturities. Used to seed model setups and throughout the test
//! suites.

use chrono::NaiveDate;

use sr_core::{DiscountFactor, Rate, Time};

use crate::forward_curve::ForwardCurve;

/// A curve with one constant continuously-compounded forward rate.
#[derive(Debug, Clone, Copy)]
pub struct FlatForwardCurve {
    reference_date: NaiveDate,
    rate: Rate,
}

impl FlatForwardCurve {
    /// Creates a flat curve at `rate`, continuously compounded.
    pub fn new(reference_date: NaiveDate, rate: Rate) -> Self {
        Self {
            reference_date,
            rate,
        }
    }

    /// The flat continuously-compounded rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }
}

impl ForwardCurve for FlatForwardCurve {
    fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    fn discount(&self, t: Time) -> DiscountFactor {
        (-self.rate * t.max(0.0)).exp()
    }
}
