//! Unadjusted monthly payment schedules.

use chrono::{Months, NaiveDate};
use sr_core::{Error, Result};

/// Builds an unadjusted monthly schedule of `months + 1` dates starting
/// at `start`.
///
/// Each date is `start` rolled forward by a whole number of months, so a
/// start on the 31st clamps to month-end where needed and recovers the
/// original day afterwards (Jan 31 -> Feb 29 -> Mar 31). No business-day
/// adjustment is applied.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sr_cashflows::monthly_schedule;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let schedule = monthly_schedule(start, 2).unwrap();
/// assert_eq!(schedule[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(schedule[2], NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
/// ```
pub fn monthly_schedule(start: NaiveDate, months: u32) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(months as usize + 1);
    for k in 0..=months {
        let date = start.checked_add_months(Months::new(k)).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "schedule date {start} + {k} months is outside the supported range"
            ))
        })?;
        dates.push(date);
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn schedule_spans_both_endpoints() {
        let schedule = monthly_schedule(date(2024, 3, 15), 12).unwrap();

        assert_eq!(schedule.len(), 13);
        assert_eq!(schedule[0], date(2024, 3, 15));
        assert_eq!(schedule[12], date(2025, 3, 15));
        for window in schedule.windows(2) {
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn month_end_clamps_without_drifting() {
        let schedule = monthly_schedule(date(2024, 1, 31), 4).unwrap();

        // rolls are anchored on the start date, so the clamp to
        // February does not shorten every later month
        assert_eq!(
            schedule,
            vec![
                date(2024, 1, 31),
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30),
                date(2024, 5, 31),
            ]
        );
    }

    #[test]
    fn zero_months_is_just_the_start_date() {
        assert_eq!(
            monthly_schedule(date(2024, 6, 3), 0).unwrap(),
            vec![date(2024, 6, 3)]
        );
    }
}
