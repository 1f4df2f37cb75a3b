use chrono::NaiveDate;
use oneday_db::table::DailyStep;
use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::Command;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StepsInput {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    pub date: NaiveDate,
    #[validate(range(min = 0, message = "steps must not be negative"))]
    pub steps: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct StepRow {
    pub date: NaiveDate,
    pub steps: i64,
}

impl Command {
    /// Sets the step count of a day, replacing any previous value.
    pub async fn upsert_steps(&self, input: StepsInput) -> oneday_shared::Result<()> {
        input.validate()?;

        let statement = Query::insert()
            .into_table(DailyStep::Table)
            .columns([
                DailyStep::UserId,
                DailyStep::Date,
                DailyStep::Steps,
                DailyStep::UpdatedAt,
            ])
            .values_panic([
                input.user_id.into(),
                input.date.to_string().into(),
                input.steps.into(),
                chrono::Utc::now().timestamp().into(),
            ])
            .on_conflict(
                OnConflict::columns([DailyStep::UserId, DailyStep::Date])
                    .update_columns([DailyStep::Steps, DailyStep::UpdatedAt])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }
}

impl crate::Query {
    pub async fn steps(
        &self,
        user_id: impl Into<String>,
        date: NaiveDate,
    ) -> anyhow::Result<Option<StepRow>> {
        let statement = Query::select()
            .columns([DailyStep::Date, DailyStep::Steps])
            .from(DailyStep::Table)
            .and_where(Expr::col(DailyStep::UserId).eq(user_id.into()))
            .and_where(Expr::col(DailyStep::Date).eq(date.to_string()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, StepRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    pub async fn steps_range(
        &self,
        user_id: impl Into<String>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<StepRow>> {
        let statement = Query::select()
            .columns([DailyStep::Date, DailyStep::Steps])
            .from(DailyStep::Table)
            .and_where(Expr::col(DailyStep::UserId).eq(user_id.into()))
            .and_where(Expr::col(DailyStep::Date).gte(from.to_string()))
            .and_where(Expr::col(DailyStep::Date).lte(to.to_string()))
            .order_by(DailyStep::Date, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, StepRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}
