//! Deposit-strip discount curve.
//!
//! Builds a discount curve from a strip of dated simple deposit quotes,
//! each one starting on its own quote date and maturing one index tenor
//! later. Because every quote only depends on discount factors at or
//! before its own start, the strip bootstraps in one pass without a
//! solver.

use chrono::{Months, NaiveDate};

use sr_core::{
    year_fraction_act360, year_fraction_act365, DiscountFactor, Error, Rate, Result, Time,
};

use crate::forward_curve::ForwardCurve;
use crate::tenor::IndexTenor;

/// A discount curve bootstrapped from dated simple deposit rates.
///
/// The reference date is the earliest quote date. Pillars sit at the
/// deposit maturities; between them the continuously-compounded zero rate
/// interpolates linearly, and it extrapolates flat on both ends.
#[derive(Debug, Clone)]
pub struct DepositStripCurve {
    reference_date: NaiveDate,
    times: Vec<Time>,
    zeros: Vec<Rate>,
}

impl DepositStripCurve {
    /// Bootstraps a curve from `quotes`, pairs of quote date and simple
    /// Act/360 deposit rate, all sharing the deposit tenor `tenor`.
    ///
    /// Quotes may arrive in any order; they are sorted by date first.
    /// Fails if `quotes` is empty, if two quotes share a date, or if a
    /// quote implies a non-positive growth factor over its accrual.
    pub fn new(tenor: IndexTenor, quotes: &[(NaiveDate, Rate)]) -> Result<Self> {
        if quotes.is_empty() {
            return Err(Error::InvalidArgument(
                "deposit strip needs at least one quote".into(),
            ));
        }

        let mut sorted: Vec<(NaiveDate, Rate)> = quotes.to_vec();
        sorted.sort_by_key(|&(date, _)| date);
        let reference_date = sorted[0].0;

        let mut times: Vec<Time> = Vec::with_capacity(sorted.len());
        let mut zeros: Vec<Rate> = Vec::with_capacity(sorted.len());

        for &(start, rate) in &sorted {
            let maturity = start
                .checked_add_months(Months::new(tenor.months()))
                .ok_or_else(|| {
                    Error::Curve(format!("deposit maturity out of range for quote on {start}"))
                })?;
            let accrual = year_fraction_act360(start, maturity);
            let growth = 1.0 + rate * accrual;
            if !growth.is_finite() || growth <= 0.0 {
                return Err(Error::Curve(format!(
                    "quote {rate} on {start} implies a non-positive growth factor"
                )));
            }

            let t_start = year_fraction_act365(reference_date, start);
            let t_maturity = year_fraction_act365(reference_date, maturity);
            if let Some(&last) = times.last() {
                if t_maturity <= last {
                    return Err(Error::Curve(format!(
                        "duplicate or overlapping pillar at {maturity}"
                    )));
                }
            }

            let df = discount_with(&times, &zeros, t_start) / growth;
            times.push(t_maturity);
            zeros.push(-df.ln() / t_maturity);
        }

        Ok(Self {
            reference_date,
            times,
            zeros,
        })
    }

    /// Number of bootstrapped pillars, one per quote.
    pub fn pillars(&self) -> usize {
        self.times.len()
    }
}

impl ForwardCurve for DepositStripCurve {
    fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    fn discount(&self, t: Time) -> DiscountFactor {
        discount_with(&self.times, &self.zeros, t)
    }
}

fn discount_with(times: &[Time], zeros: &[Rate], t: Time) -> DiscountFactor {
    if t <= 0.0 || times.is_empty() {
        return 1.0;
    }
    (-zero_at(times, zeros, t) * t).exp()
}

fn zero_at(times: &[Time], zeros: &[Rate], t: Time) -> Rate {
    let n = times.len();
    if t <= times[0] {
        return zeros[0];
    }
    if t >= times[n - 1] {
        return zeros[n - 1];
    }
    let i = locate(times, t);
    let w = (t - times[i]) / (times[i + 1] - times[i]);
    zeros[i] + w * (zeros[i + 1] - zeros[i])
}

// Left index of the pillar interval bracketing t, clamped to valid range.
fn locate(times: &[Time], t: Time) -> usize {
    let idx = times.partition_point(|&x| x <= t);
    idx.saturating_sub(1).min(times.len() - 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_quote_reproduces_the_deposit() {
        let start = date(2024, 1, 2);
        let curve = DepositStripCurve::new(IndexTenor::M6, &[(start, 0.03)]).unwrap();
        let maturity = date(2024, 7, 2);

        let accrual = (maturity - start).num_days() as f64 / 360.0;
        let expected_df = 1.0 / (1.0 + 0.03 * accrual);
        assert_abs_diff_eq!(curve.discount_at(maturity), expected_df, epsilon = 1e-14);
        assert_abs_diff_eq!(curve.forward_rate(start, maturity), 0.03, epsilon = 1e-12);
        assert_eq!(curve.pillars(), 1);
    }

    #[test]
    fn later_quotes_extend_the_strip() {
        let d1 = date(2024, 1, 2);
        let d2 = date(2024, 7, 2);
        let curve =
            DepositStripCurve::new(IndexTenor::M6, &[(d1, 0.030), (d2, 0.025)]).unwrap();

        assert_eq!(curve.pillars(), 2);
        // each quote is recovered as the simple forward over its own deposit
        assert_abs_diff_eq!(curve.forward_rate(d1, date(2024, 7, 2)), 0.030, epsilon = 1e-12);
        assert_abs_diff_eq!(curve.forward_rate(d2, date(2025, 1, 2)), 0.025, epsilon = 1e-12);
    }

    #[test]
    fn quote_order_does_not_matter() {
        let quotes_fwd = [
            (date(2024, 1, 2), 0.030),
            (date(2024, 7, 2), 0.025),
            (date(2025, 1, 2), 0.028),
        ];
        let mut quotes_rev = quotes_fwd;
        quotes_rev.reverse();

        let a = DepositStripCurve::new(IndexTenor::M6, &quotes_fwd).unwrap();
        let b = DepositStripCurve::new(IndexTenor::M6, &quotes_rev).unwrap();
        for t in [0.25, 0.6, 1.0, 1.4] {
            assert_abs_diff_eq!(a.discount(t), b.discount(t), epsilon = 1e-15);
        }
    }

    #[test]
    fn discounts_decrease_for_positive_rates() {
        let curve = DepositStripCurve::new(
            IndexTenor::M6,
            &[(date(2024, 1, 2), 0.03), (date(2024, 7, 2), 0.032)],
        )
        .unwrap();
        let mut prev = 1.0;
        for step in 1..=20 {
            let df = curve.discount(step as f64 * 0.1);
            assert!(df < prev, "discount not decreasing at step {step}");
            prev = df;
        }
    }

    #[test]
    fn extrapolation_is_flat_in_the_zero_rate() {
        let curve = DepositStripCurve::new(IndexTenor::M6, &[(date(2024, 1, 2), 0.03)]).unwrap();
        let t_last = 182.0 / 365.0;
        let z = -curve.discount(t_last).ln() / t_last;
        for t in [1.0, 5.0, 30.0] {
            assert_abs_diff_eq!(curve.discount(t), (-z * t).exp(), epsilon = 1e-12);
        }
    }

    #[test]
    fn mildly_negative_rates_are_fine() {
        let curve =
            DepositStripCurve::new(IndexTenor::M6, &[(date(2019, 3, 1), -0.0023)]).unwrap();
        // a negative deposit rate discounts to slightly above par
        assert!(curve.discount_at(date(2019, 9, 1)) > 1.0);
    }

    #[test]
    fn empty_strip_is_rejected() {
        let err = DepositStripCurve::new(IndexTenor::M6, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn duplicate_quote_dates_are_rejected() {
        let d = date(2024, 1, 2);
        let err = DepositStripCurve::new(IndexTenor::M6, &[(d, 0.03), (d, 0.031)]).unwrap_err();
        assert!(matches!(err, Error::Curve(_)));
    }

    #[test]
    fn absurd_quotes_are_rejected() {
        let d = date(2024, 1, 2);
        for bad in [-3.0, f64::NAN] {
            let err = DepositStripCurve::new(IndexTenor::M6, &[(d, bad)]).unwrap_err();
            assert!(matches!(err, Error::Curve(_)), "rate {bad} should fail");
        }
    }
}
