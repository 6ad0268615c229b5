use chrono::{Days, NaiveDate};

use super::error::{ScheduleError, ScheduleResult};

/// Next service date: `date + interval` calendar days
///
/// `None` when not recurring, when `interval <= 0` or when there is no date.
pub fn compute_next_service_date(
    date: Option<NaiveDate>,
    is_recurring: bool,
    interval: i64,
) -> Option<NaiveDate> {
    if !is_recurring || interval <= 0 {
        return None;
    }
    let date = date?;
    let next = date.checked_add_days(Days::new(interval.unsigned_abs()));
    if next.is_none() {
        tracing::warn!(%date, interval, "Next service date out of range");
    }
    next
}

/// A recurring order needs a positive interval
pub fn validate_cadence(is_recurring: bool, interval: i64) -> ScheduleResult<()> {
    if is_recurring && interval <= 0 {
        return Err(ScheduleError::InvalidInterval(interval));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_thirty_days() {
        assert_eq!(
            compute_next_service_date(Some(date(2024, 1, 1)), true, 30),
            Some(date(2024, 1, 31))
        );
    }

    #[test]
    fn test_not_recurring_or_no_interval() {
        let d = Some(date(2024, 1, 1));
        assert_eq!(compute_next_service_date(d, false, 30), None);
        assert_eq!(compute_next_service_date(d, true, 0), None);
        assert_eq!(compute_next_service_date(d, true, -7), None);
        assert_eq!(compute_next_service_date(None, true, 30), None);
    }

    #[test]
    fn test_calendar_arithmetic() {
        // leap year, month and year boundaries
        assert_eq!(
            compute_next_service_date(Some(date(2024, 2, 28)), true, 1),
            Some(date(2024, 2, 29))
        );
        assert_eq!(
            compute_next_service_date(Some(date(2023, 12, 15)), true, 90),
            Some(date(2024, 3, 14))
        );
        for n in [1_i64, 7, 14, 30, 365] {
            let start = date(2024, 6, 10);
            let next = compute_next_service_date(Some(start), true, n).unwrap();
            assert_eq!((next - start).num_days(), n);
        }
    }

    #[test]
    fn test_overflow_is_none() {
        assert_eq!(compute_next_service_date(Some(NaiveDate::MAX), true, 1), None);
    }

    #[test]
    fn test_validate_cadence() {
        assert!(validate_cadence(false, 0).is_ok());
        assert!(validate_cadence(true, 30).is_ok());
        assert_eq!(validate_cadence(true, 0), Err(ScheduleError::InvalidInterval(0)));
        assert!(validate_cadence(true, -1).is_err());
    }
}
