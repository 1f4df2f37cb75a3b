use oneday_daycache::{DayKey, DaySink, Rejected};
use oneday_shared::Error;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Command, MealInput, ReplaceMealsInput, StepsInput};

/// Draft of one day's meals and step count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DayLog {
    #[serde(default)]
    #[validate(nested)]
    pub meals: Vec<MealInput>,
    #[validate(range(min = 0, message = "steps must not be negative"))]
    pub steps: Option<i64>,
}

/// Input errors can never succeed on retry.
fn into_sink_error(err: Error) -> anyhow::Error {
    match err {
        Error::Validate(_) | Error::InvalidInput(_) => Rejected(err.to_string()).into(),
        err => err.into(),
    }
}

/// Persists settled [`DayLog`] drafts.
#[derive(Clone)]
pub struct DayLogSink(pub Command);

#[async_trait::async_trait]
impl DaySink<DayLog> for DayLogSink {
    async fn persist(&self, key: &DayKey, value: &DayLog) -> anyhow::Result<()> {
        self.0
            .replace_meals(ReplaceMealsInput {
                user_id: key.user_id.to_owned(),
                date: key.date,
                meals: value.meals.to_owned(),
            })
            .await
            .map_err(into_sink_error)?;

        if let Some(steps) = value.steps {
            self.0
                .upsert_steps(StepsInput {
                    user_id: key.user_id.to_owned(),
                    date: key.date,
                    steps,
                })
                .await
                .map_err(into_sink_error)?;
        }

        Ok(())
    }
}
