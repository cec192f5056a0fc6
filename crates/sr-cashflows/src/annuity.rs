//! Annuity projection along a simulated rate path.

use std::collections::BTreeSet;

use chrono::{Months, NaiveDate};
use sr_core::{ensure_post, Error, Rate, Real, Result};
use sr_termstructures::{DepositStripCurve, ForwardCurve, IndexTenor};

use crate::schedule::monthly_schedule;

// ── Payment schedule ────────────────────────────────────────────────────────

/// One projected payment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentScheduleEntry {
    /// Payment date, unadjusted.
    pub date: NaiveDate,
    /// Payment amount; never negative.
    pub amount: Real,
}

// ── Projection ──────────────────────────────────────────────────────────────

/// Projects the monthly payments of an annuity financed at floating rates.
///
/// `path_points` are dated short rates in decimal form, typically one
/// simulated path mapped onto calendar dates. Duplicate dates keep the
/// first occurrence; the surviving points are bootstrapped into a
/// [`DepositStripCurve`] with deposits of the given `tenor`.
///
/// Payments run monthly from the curve's reference date, the first one
/// on that date itself. Each month `k` out of `total = term_years * 12`
/// accrues at `i`, one twelfth of the 1-month simple forward rate
/// observed on its own payment date, and pays
///
/// ```text
/// payment = outstanding * i / (1 - (1 + i)^-n),    n = total - k
/// ```
///
/// which degenerates to `outstanding / n` when `i` is zero. Because the
/// installment is recomputed from the months still outstanding, the final
/// month pays `outstanding * (1 + i)` and retires the balance exactly.
/// Projection stops after `total` payments or as soon as the balance
/// reaches zero.
///
/// # Errors
///
/// Fails with [`Error::InvalidArgument`] when `principal` is not a
/// positive finite number, `term_years` is zero or overflows the monthly
/// payment count, or a monthly rate at or below -100% makes the
/// installment formula meaningless. Curve construction errors propagate
/// unchanged.
pub fn project_annuity(
    path_points: &[(NaiveDate, Rate)],
    principal: Real,
    term_years: u32,
    tenor: IndexTenor,
) -> Result<Vec<PaymentScheduleEntry>> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "principal must be a positive finite number, got {principal}"
        )));
    }
    if term_years == 0 {
        return Err(Error::InvalidArgument(
            "annuity term must be at least one year".into(),
        ));
    }

    // first occurrence per date wins
    let mut seen = BTreeSet::new();
    let quotes: Vec<(NaiveDate, Rate)> = path_points
        .iter()
        .filter(|(date, _)| seen.insert(*date))
        .copied()
        .collect();
    let curve = DepositStripCurve::new(tenor, &quotes)?;

    let total = term_years.checked_mul(12).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "term of {term_years} years overflows the payment count"
        ))
    })?;
    let schedule = monthly_schedule(curve.reference_date(), total)?;

    let mut entries = Vec::with_capacity(total as usize);
    let mut outstanding = principal;
    for (k, &payment_date) in schedule.iter().take(total as usize).enumerate() {
        let accrual_end = payment_date.checked_add_months(Months::new(1)).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "accrual period starting {payment_date} is outside the supported range"
            ))
        })?;
        let monthly = curve.forward_rate(payment_date, accrual_end) / 12.0;
        if monthly <= -1.0 {
            return Err(Error::InvalidArgument(format!(
                "monthly rate {monthly} on {payment_date} is at or below -100%"
            )));
        }

        let remaining = total - k as u32;
        let discount = 1.0 - (1.0 + monthly).powi(-(remaining as i32));
        // discount collapses to zero exactly when the rate does
        let payment = if discount == 0.0 {
            outstanding / Real::from(remaining)
        } else {
            outstanding * monthly / discount
        };
        ensure_post!(
            payment.is_finite() && payment >= 0.0,
            "payment of {payment} on {payment_date} is not a valid amount"
        );

        outstanding -= payment - outstanding * monthly;
        entries.push(PaymentScheduleEntry {
            date: payment_date,
            amount: payment,
        });
        if outstanding <= 0.0 {
            break;
        }
    }
    Ok(entries)
}
