use chrono::NaiveDate;
use oneday_db::table::MenstrualCycle;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::{Command, Prediction, predict};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCycleInput {
    #[validate(required(message = "userId is required"))]
    pub user_id: Option<String>,
    #[validate(required(message = "startDate is required"))]
    pub start_date: Option<NaiveDate>,
    #[validate(required(message = "endDate is required"))]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CycleRow {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Recorded periods, newest first, with the next predicted one.
#[derive(Debug, Clone, Serialize)]
pub struct CycleHistory {
    pub prediction: Option<Prediction>,
    pub history: Vec<CycleRow>,
}

impl Command {
    pub async fn add_cycle(&self, input: AddCycleInput) -> oneday_shared::Result<String> {
        input.validate()?;

        let (Some(user_id), Some(start_date), Some(end_date)) =
            (input.user_id, input.start_date, input.end_date)
        else {
            oneday_shared::bail!("required fields missing after validation");
        };

        if start_date > end_date {
            oneday_shared::invalid!("startDate must not be after endDate");
        }

        let id = ulid::Ulid::new().to_string();
        let statement = Query::insert()
            .into_table(MenstrualCycle::Table)
            .columns([
                MenstrualCycle::Id,
                MenstrualCycle::UserId,
                MenstrualCycle::StartDate,
                MenstrualCycle::EndDate,
                MenstrualCycle::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                user_id.into(),
                start_date.to_string().into(),
                end_date.to_string().into(),
                chrono::Utc::now().timestamp().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(id)
    }

    pub async fn delete_cycle(&self, id: impl Into<String>) -> oneday_shared::Result<()> {
        let statement = Query::delete()
            .from_table(MenstrualCycle::Table)
            .and_where(Expr::col(MenstrualCycle::Id).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            return Err(oneday_shared::Error::NotFound);
        }

        Ok(())
    }
}

impl crate::Query {
    pub async fn cycles(&self, user_id: impl Into<String>) -> anyhow::Result<Vec<CycleRow>> {
        let statement = Query::select()
            .columns([
                MenstrualCycle::Id,
                MenstrualCycle::StartDate,
                MenstrualCycle::EndDate,
            ])
            .from(MenstrualCycle::Table)
            .and_where(Expr::col(MenstrualCycle::UserId).eq(user_id.into()))
            .order_by(MenstrualCycle::StartDate, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, CycleRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn cycle_history(
        &self,
        user_id: impl Into<String>,
        today: NaiveDate,
    ) -> anyhow::Result<CycleHistory> {
        let history = self.cycles(user_id).await?;
        let periods = history
            .iter()
            .map(|row| (row.start_date, row.end_date))
            .collect::<Vec<_>>();

        Ok(CycleHistory {
            prediction: predict(&periods, today),
            history,
        })
    }
}
