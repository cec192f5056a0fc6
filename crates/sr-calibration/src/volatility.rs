//! Rolling historical volatility surface.
//!
//! The estimator turns a percent-quoted fixing history into annualized
//! log-return volatilities over six fixed lookback windows. The input is
//! first stretched onto a contiguous daily calendar (weekends and holidays
//! carry the last known fixing; no trading calendar is consulted), so the
//! window lengths below count calendar rows of that filled series.
//!
//! A fixing of zero or below cannot produce a log return; the affected
//! steps are removed before the windows roll, and the windows bridge the
//! removal over the surviving returns, never a panic or an error.
//! Histories shorter than the longest window simply produce an empty
//! surface.

use chrono::NaiveDate;

use sr_core::{Error, Real, Result, Time, Volatility};
use sr_math::rolling_std;

use crate::fixings::FixingPoint;

/// Rolling window lengths in trading days (1, 2, 5, 10, 15 and 20 years).
pub const WINDOW_DAYS: [usize; 6] = [252, 504, 1260, 2520, 3780, 5040];

/// Window maturities in years, column-for-column with [`WINDOW_DAYS`].
pub const WINDOW_YEARS: [Time; 6] = [1.0, 2.0, 5.0, 10.0, 15.0, 20.0];

/// Trading days per year; `sqrt` of this annualizes a daily volatility.
pub const TRADING_DAYS_PER_YEAR: Real = 252.0;

// ── Calendar fill and returns ─────────────────────────────────────────────────

/// Stretches fixings onto a contiguous daily calendar over
/// `[earliest, latest]`, carrying the last known value into missing days.
///
/// Input order does not matter; duplicate dates collapse to their first
/// occurrence. An empty input yields an empty output.
pub fn forward_fill_daily(points: &[FixingPoint]) -> Vec<FixingPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.date);
    sorted.dedup_by_key(|p| p.date);

    let last = match sorted.last() {
        Some(point) => point.date,
        None => return Vec::new(),
    };

    let mut filled = Vec::new();
    let mut next = 0;
    let mut rate = sorted[0].rate;
    for date in sorted[0].date.iter_days().take_while(|d| *d <= last) {
        if next < sorted.len() && sorted[next].date == date {
            rate = sorted[next].rate;
            next += 1;
        }
        filled.push(FixingPoint::new(date, rate));
    }
    filled
}

/// Log returns `ln(x[t] / x[t-1])` between consecutive values.
///
/// A step where either value is non-positive yields `NaN` as a missing-data
/// marker. Output length is `rates.len() - 1` (empty for short inputs).
pub(crate) fn log_returns(rates: &[Real]) -> Vec<Real> {
    rates
        .windows(2)
        .map(|pair| {
            if pair[0] > 0.0 && pair[1] > 0.0 {
                (pair[1] / pair[0]).ln()
            } else {
                Real::NAN
            }
        })
        .collect()
}

// ── Surface ───────────────────────────────────────────────────────────────────

/// One surface row: the annualized volatility of each window as of `date`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilitySurfacePoint {
    /// Date of the last return entering the windows.
    pub date: NaiveDate,
    /// Annualized volatilities, column-for-column with [`WINDOW_DAYS`].
    pub vols: [Volatility; 6],
}

/// Historical volatility surface over the six standard windows.
///
/// Only dates where *every* window is fully populated appear as rows, so
/// the first row is roughly twenty years after the history starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolatilitySurface {
    points: Vec<VolatilitySurfacePoint>,
}

impl VolatilitySurface {
    /// Estimates the surface from percent-quoted fixings.
    ///
    /// Steps: convert to decimals, forward-fill onto a daily calendar, take
    /// log returns and drop the non-finite ones, then compute the rolling
    /// sample standard deviation for each window in [`WINDOW_DAYS`] and
    /// annualize by `sqrt(TRADING_DAYS_PER_YEAR)`. The windows roll over
    /// the surviving returns, so a bad fixing costs only the returns that
    /// touch it and nothing downstream. Rows where any window is not yet
    /// fully populated are dropped.
    ///
    /// Short histories produce an empty surface; that is a valid outcome,
    /// not an error.
    pub fn estimate(points: &[FixingPoint]) -> Self {
        let decimal: Vec<FixingPoint> = points
            .iter()
            .map(|p| FixingPoint::new(p.date, p.rate / 100.0))
            .collect();
        let filled = forward_fill_daily(&decimal);
        if filled.len() < 2 {
            return Self::default();
        }

        let rates: Vec<Real> = filled.iter().map(|p| p.rate).collect();
        // return i spans filled[i] -> filled[i + 1], so it is dated at
        // i + 1; unusable steps are removed here, before the windows roll
        let mut dates = Vec::new();
        let mut returns = Vec::new();
        for (i, r) in log_returns(&rates).into_iter().enumerate() {
            if r.is_finite() {
                dates.push(filled[i + 1].date);
                returns.push(r);
            }
        }
        let columns: Vec<Vec<Option<Real>>> = WINDOW_DAYS
            .iter()
            .map(|&window| rolling_std(&returns, window))
            .collect();

        let annualize = TRADING_DAYS_PER_YEAR.sqrt();
        let mut rows = Vec::new();
        for i in 0..returns.len() {
            let mut vols = [0.0; 6];
            let mut complete = true;
            for (k, column) in columns.iter().enumerate() {
                match column[i] {
                    Some(sd) => vols[k] = sd * annualize,
                    None => {
                        complete = false;
                        break;
                    }
                }
            }
            if complete {
                rows.push(VolatilitySurfacePoint {
                    date: dates[i],
                    vols,
                });
            }
        }
        Self { points: rows }
    }

    /// Wraps precomputed surface rows, e.g. loaded from a cache.
    pub fn from_points(points: Vec<VolatilitySurfacePoint>) -> Self {
        Self { points }
    }

    /// Surface rows in date order.
    pub fn points(&self) -> &[VolatilitySurfacePoint] {
        &self.points
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the surface has no rows.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Per-window mean volatility across all rows, the calibration target.
    ///
    /// Errors with [`Error::InsufficientHistory`] on an empty surface.
    pub fn column_means(&self) -> Result<[Volatility; 6]> {
        if self.points.is_empty() {
            return Err(Error::InsufficientHistory {
                required: 1,
                available: 0,
            });
        }
        let mut means = [0.0; 6];
        for point in &self.points {
            for (mean, vol) in means.iter_mut().zip(point.vols.iter()) {
                *mean += vol;
            }
        }
        let n = self.points.len() as Real;
        for mean in &mut means {
            *mean /= n;
        }
        Ok(means)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
