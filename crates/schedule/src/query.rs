use chrono::NaiveDate;
use oneday_db::table::Schedule;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub id: String,
    pub user_id: String,
    pub series_id: String,
    pub date: NaiveDate,
    pub title: String,
    pub time: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub reminder: bool,
    pub completed: bool,
}

const COLUMNS: [Schedule; 10] = [
    Schedule::Id,
    Schedule::UserId,
    Schedule::SeriesId,
    Schedule::Date,
    Schedule::Title,
    Schedule::Time,
    Schedule::Category,
    Schedule::Color,
    Schedule::Reminder,
    Schedule::Completed,
];

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    /// Entries of `user_id` dated within `[from, to]`, by date then time.
    pub async fn list(
        &self,
        user_id: impl Into<String>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<ScheduleRow>> {
        let statement = sea_query::Query::select()
            .columns(COLUMNS)
            .from(Schedule::Table)
            .and_where(Expr::col(Schedule::UserId).eq(user_id.into()))
            .and_where(Expr::col(Schedule::Date).gte(from.to_string()))
            .and_where(Expr::col(Schedule::Date).lte(to.to_string()))
            .order_by(Schedule::Date, Order::Asc)
            .order_by(Schedule::Time, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ScheduleRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<ScheduleRow>> {
        let statement = sea_query::Query::select()
            .columns(COLUMNS)
            .from(Schedule::Table)
            .and_where(Expr::col(Schedule::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ScheduleRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    pub async fn series(&self, series_id: impl Into<String>) -> anyhow::Result<Vec<ScheduleRow>> {
        let statement = sea_query::Query::select()
            .columns(COLUMNS)
            .from(Schedule::Table)
            .and_where(Expr::col(Schedule::SeriesId).eq(series_id.into()))
            .order_by(Schedule::Date, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ScheduleRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}
