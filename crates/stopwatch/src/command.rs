use std::ops::Deref;

use chrono::{DateTime, NaiveDate, Utc};
use oneday_db::table::StopwatchRecord;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

#[derive(Clone)]
pub struct Command(pub oneday_shared::State);

impl Deref for Command {
    type Target = oneday_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A finished stopwatch session.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordInput {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[validate(length(min = 1, max = 100, message = "task must be 1 to 100 characters"))]
    pub task: String,
    #[validate(length(max = 30, message = "category must be at most 30 characters"))]
    pub category: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Day the session is filed under, the UTC date of `started_at` if absent.
    pub date: Option<NaiveDate>,
}

impl Command {
    pub async fn record(&self, input: RecordInput) -> oneday_shared::Result<String> {
        input.validate()?;

        if input.ended_at < input.started_at {
            oneday_shared::invalid!("endedAt must not be before startedAt");
        }

        let id = ulid::Ulid::new().to_string();
        let date = input.date.unwrap_or_else(|| input.started_at.date_naive());
        let duration_secs = (input.ended_at - input.started_at).num_seconds();

        let statement = Query::insert()
            .into_table(StopwatchRecord::Table)
            .columns([
                StopwatchRecord::Id,
                StopwatchRecord::UserId,
                StopwatchRecord::Date,
                StopwatchRecord::Task,
                StopwatchRecord::Category,
                StopwatchRecord::StartedAt,
                StopwatchRecord::EndedAt,
                StopwatchRecord::DurationSecs,
            ])
            .values_panic([
                id.to_owned().into(),
                input.user_id.into(),
                date.to_string().into(),
                input.task.into(),
                input.category.into(),
                input.started_at.timestamp().into(),
                input.ended_at.timestamp().into(),
                duration_secs.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        tracing::debug!(id = %id, duration_secs, "stopwatch session recorded");

        Ok(id)
    }

    pub async fn delete(&self, id: impl Into<String>) -> oneday_shared::Result<()> {
        let statement = Query::delete()
            .from_table(StopwatchRecord::Table)
            .and_where(Expr::col(StopwatchRecord::Id).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            return Err(oneday_shared::Error::NotFound);
        }

        Ok(())
    }
}
