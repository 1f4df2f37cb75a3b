use chrono::NaiveDate;
use oneday_db::table::Todo;
use sea_query::{Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TodoRow {
    pub id: String,
    pub user_id: String,
    pub series_id: String,
    pub date: NaiveDate,
    pub title: String,
    pub category: Option<String>,
    pub color: Option<String>,
    pub completed: bool,
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    /// Todos of `user_id` dated within `[from, to]`, oldest first.
    pub async fn list(
        &self,
        user_id: impl Into<String>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<TodoRow>> {
        let statement = select()
            .and_where(Expr::col(Todo::UserId).eq(user_id.into()))
            .and_where(Expr::col(Todo::Date).gte(from.to_string()))
            .and_where(Expr::col(Todo::Date).lte(to.to_string()))
            .order_by(Todo::Date, Order::Asc)
            .order_by(Todo::CreatedAt, Order::Asc)
            .to_owned();

        self.fetch_all(statement).await
    }

    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<TodoRow>> {
        let statement = select()
            .and_where(Expr::col(Todo::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TodoRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    pub async fn series(&self, series_id: impl Into<String>) -> anyhow::Result<Vec<TodoRow>> {
        let statement = select()
            .and_where(Expr::col(Todo::SeriesId).eq(series_id.into()))
            .order_by(Todo::Date, Order::Asc)
            .to_owned();

        self.fetch_all(statement).await
    }

    async fn fetch_all(&self, statement: SelectStatement) -> anyhow::Result<Vec<TodoRow>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TodoRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}

fn select() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            Todo::Id,
            Todo::UserId,
            Todo::SeriesId,
            Todo::Date,
            Todo::Title,
            Todo::Category,
            Todo::Color,
            Todo::Completed,
        ])
        .from(Todo::Table)
        .to_owned()
}
