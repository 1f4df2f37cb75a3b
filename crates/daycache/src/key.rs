use std::{fmt, str::FromStr};

use chrono::NaiveDate;

/// A user's calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey {
    pub user_id: String,
    pub date: NaiveDate,
}

impl DayKey {
    pub fn new(user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            date,
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user_id, self.date)
    }
}

impl FromStr for DayKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((user_id, date)) = s.rsplit_once('/') else {
            anyhow::bail!("day key `{s}` has no date part");
        };

        if user_id.is_empty() {
            anyhow::bail!("day key `{s}` has no user part");
        }

        Ok(Self::new(user_id, date.parse()?))
    }
}
