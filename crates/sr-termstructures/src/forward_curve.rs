//! Discount-factor and forward-rate queries on a dated curve.

use chrono::NaiveDate;
use sr_core::{year_fraction_act360, year_fraction_act365, DiscountFactor, Rate, Time};

/// A term structure of discount factors anchored at a reference date.
///
/// Implementors provide `reference_date` and `discount`; every other query
/// is derived. Times are Act/365 Fixed year fractions from the reference
/// date, money-market forwards accrue Act/360 Simple.
pub trait ForwardCurve {
    /// The date at which the curve starts; `discount` is 1 there.
    fn reference_date(&self) -> NaiveDate;

    /// Discount factor at time `t` in years from the reference date.
    ///
    /// Implementations extrapolate flat beyond their last pillar and
    /// return 1 for `t <= 0`.
    fn discount(&self, t: Time) -> DiscountFactor;

    /// Year fraction from the reference date to `date`, Act/365 Fixed.
    fn time_from_reference(&self, date: NaiveDate) -> Time {
        year_fraction_act365(self.reference_date(), date)
    }

    /// Discount factor on a calendar date.
    fn discount_at(&self, date: NaiveDate) -> DiscountFactor {
        self.discount(self.time_from_reference(date))
    }

    /// Instantaneous continuously-compounded forward rate at `t`.
    ///
    /// Central difference on the log discount over a narrow bracket,
    /// clamped so the bracket never starts before the reference date.
    fn instantaneous_forward(&self, t: Time) -> Rate {
        let dt = 1e-4;
        let t1 = (t - dt / 2.0).max(0.0);
        let t2 = t + dt / 2.0;
        (self.discount(t1) / self.discount(t2)).ln() / (t2 - t1)
    }

    /// Simple forward rate between `d1` and `d2` with Act/360 accrual.
    ///
    /// Coincident dates collapse to the instantaneous forward at `d1`.
    fn forward_rate(&self, d1: NaiveDate, d2: NaiveDate) -> Rate {
        if d1 == d2 {
            return self.instantaneous_forward(self.time_from_reference(d1));
        }
        let accrual = year_fraction_act360(d1, d2);
        (self.discount_at(d1) / self.discount_at(d2) - 1.0) / accrual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // df(t) = exp(-(0.02·t + 0.005·t²)), so f(t) = 0.02 + 0.01·t
    struct QuadraticZero {
        reference: NaiveDate,
    }

    impl ForwardCurve for QuadraticZero {
        fn reference_date(&self) -> NaiveDate {
            self.reference
        }

        fn discount(&self, t: Time) -> DiscountFactor {
            if t <= 0.0 {
                return 1.0;
            }
            (-(0.02 * t + 0.005 * t * t)).exp()
        }
    }

    fn curve() -> QuadraticZero {
        QuadraticZero {
            reference: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn instantaneous_forward_matches_analytic_slope() {
        let c = curve();
        for t in [0.5, 1.0, 3.0, 10.0] {
            let expected = 0.02 + 0.01 * t;
            let got = c.instantaneous_forward(t);
            assert!((got - expected).abs() < 1e-6, "t={t}: {got} vs {expected}");
        }
    }

    #[test]
    fn instantaneous_forward_at_origin_is_clamped() {
        let c = curve();
        let got = c.instantaneous_forward(0.0);
        assert!((got - 0.02).abs() < 1e-5);
    }

    #[test]
    fn forward_rate_collapses_on_coincident_dates() {
        let c = curve();
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let t = c.time_from_reference(d);
        let inst = c.instantaneous_forward(t);
        assert!((c.forward_rate(d, d) - inst).abs() < 1e-12);
    }

    #[test]
    fn forward_rate_uses_act360_accrual() {
        let c = curve();
        let d1 = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let t1 = c.time_from_reference(d1);
        let t2 = c.time_from_reference(d2);
        let accrual = (d2 - d1).num_days() as f64 / 360.0;
        let expected = (c.discount(t1) / c.discount(t2) - 1.0) / accrual;
        assert!((c.forward_rate(d1, d2) - expected).abs() < 1e-15);
    }
}
