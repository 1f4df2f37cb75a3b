use chrono::{Datelike, NaiveDate};

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Weekday index with Sunday = 0 .. Saturday = 6.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Every day of `[start, end]`, empty when `end < start`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// First and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };

    Some((first, next.pred_opt()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_weekday_index_starts_on_sunday() {
        assert_eq!(weekday_index(date("2024-03-03")), 0);
        assert_eq!(weekday_index(date("2024-03-04")), 1);
        assert_eq!(weekday_index(date("2024-03-09")), 6);
    }

    #[test]
    fn test_days_between_is_signed() {
        assert_eq!(days_between(date("2024-01-01"), date("2024-01-29")), 28);
        assert_eq!(days_between(date("2024-01-29"), date("2024-01-01")), -28);
        assert_eq!(days_between(date("2024-02-28"), date("2024-03-01")), 2);
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(2024, 2),
            Some((date("2024-02-01"), date("2024-02-29")))
        );
        assert_eq!(
            month_bounds(2023, 12),
            Some((date("2023-12-01"), date("2023-12-31")))
        );
        assert_eq!(month_bounds(2023, 13), None);
    }

    #[test]
    fn test_days_inclusive() {
        let days = days_inclusive(date("2024-05-01"), date("2024-05-03")).collect::<Vec<_>>();
        assert_eq!(days.len(), 3);
        assert_eq!(days_inclusive(date("2024-05-03"), date("2024-05-01")).count(), 0);
    }
}
