//! Materialization of repeating schedules and todos.
//!
//! A submission is never stored as a rule. It is expanded once into the list
//! of concrete dates and every date becomes its own row.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::date::{days_inclusive, weekday_index};

/// Number of days scanned for a weekday recurrence, starting at the start date.
pub const HORIZON_DAYS: usize = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Weekdays,
    Dates,
    Range,
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recurrence {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub weekdays: BTreeSet<u8>,
    pub dates: BTreeSet<NaiveDate>,
}

impl Recurrence {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
            weekdays: BTreeSet::new(),
            dates: BTreeSet::new(),
        }
    }

    pub fn until(mut self, end_date: impl Into<Option<NaiveDate>>) -> Self {
        self.end_date = end_date.into();
        self
    }

    pub fn on_weekdays(mut self, weekdays: impl IntoIterator<Item = u8>) -> Self {
        self.weekdays.extend(weekdays);
        self
    }

    pub fn on_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.dates.extend(dates);
        self
    }

    pub fn pattern(&self) -> Pattern {
        if !self.weekdays.is_empty() {
            Pattern::Weekdays
        } else if !self.dates.is_empty() {
            Pattern::Dates
        } else if self.end_date.is_some() {
            Pattern::Range
        } else {
            Pattern::Single
        }
    }

    /// Concrete occurrence dates, ascending and without duplicates.
    pub fn expand(&self) -> crate::Result<Vec<NaiveDate>> {
        match self.pattern() {
            Pattern::Weekdays => {
                if let Some(day) = self.weekdays.iter().find(|d| **d > 6) {
                    crate::invalid!("weekday {day} is out of range, expected 0 (Sunday) to 6");
                }

                let Some(end_date) = self.end_date else {
                    crate::invalid!("endDate is required when repeating on weekdays");
                };

                self.check_order(end_date)?;

                Ok(self
                    .start_date
                    .iter_days()
                    .take(HORIZON_DAYS)
                    .take_while(|d| *d <= end_date)
                    .filter(|d| self.weekdays.contains(&weekday_index(*d)))
                    .collect())
            }
            Pattern::Dates => Ok(self.dates.iter().copied().collect()),
            Pattern::Range => {
                let end_date = self.end_date.unwrap_or(self.start_date);
                self.check_order(end_date)?;

                let dates = days_inclusive(self.start_date, end_date)
                    .take(HORIZON_DAYS + 1)
                    .collect::<Vec<_>>();

                if dates.len() > HORIZON_DAYS {
                    crate::invalid!("a date range may span at most {HORIZON_DAYS} days");
                }

                Ok(dates)
            }
            Pattern::Single => Ok(vec![self.start_date]),
        }
    }

    fn check_order(&self, end_date: NaiveDate) -> crate::Result<()> {
        if end_date < self.start_date {
            crate::invalid!("endDate must not be before startDate");
        }

        Ok(())
    }
}
