use chrono::{Days, NaiveDate};
use oneday_shared::date::days_between;
use serde::Serialize;

/// Next expected period derived from recorded history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Days from today to `start_date`, negative once it has passed.
    pub d_day: i64,
    pub avg_cycle_length: i64,
    pub avg_duration: i64,
}

impl Prediction {
    pub fn d_day_label(&self) -> String {
        d_day_label(self.d_day)
    }
}

/// `D-3` before the target day, `D-0` on it and `D+2` after it.
pub fn d_day_label(d_day: i64) -> String {
    if d_day >= 0 {
        format!("D-{d_day}")
    } else {
        format!("D+{}", -d_day)
    }
}

/// Predicts the next period from `(start, end)` pairs.
///
/// Returns `None` with fewer than two periods. Input order does not matter.
pub fn predict(periods: &[(NaiveDate, NaiveDate)], today: NaiveDate) -> Option<Prediction> {
    if periods.len() < 2 {
        return None;
    }

    let mut periods = periods.to_vec();
    periods.sort_by_key(|(start, _)| *start);

    let cycle_lengths = periods
        .windows(2)
        .map(|pair| days_between(pair[0].0, pair[1].0).abs())
        .collect::<Vec<_>>();
    let durations = periods
        .iter()
        .map(|(start, end)| days_between(*start, *end) + 1)
        .collect::<Vec<_>>();

    let avg_cycle_length = mean(&cycle_lengths);
    let avg_duration = mean(&durations);

    let (last_start, _) = periods.last()?;
    let start_date = shift(*last_start, avg_cycle_length.round() as i64)?;
    let end_date = shift(start_date, (avg_duration - 1.0).round() as i64)?;

    Some(Prediction {
        start_date,
        end_date,
        d_day: days_between(today, start_date),
        avg_cycle_length: avg_cycle_length.round() as i64,
        avg_duration: avg_duration.round() as i64,
    })
}

fn mean(values: &[i64]) -> f64 {
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}
