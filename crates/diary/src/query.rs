use chrono::NaiveDate;
use oneday_db::table::Diary;
use oneday_shared::date::month_bounds;
use sea_query::{Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DiaryRow {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    pub canvas_path: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<DiaryRow>> {
        let statement = select()
            .and_where(Expr::col(Diary::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, DiaryRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    pub async fn by_date(
        &self,
        user_id: impl Into<String>,
        date: NaiveDate,
    ) -> anyhow::Result<Option<DiaryRow>> {
        let statement = select()
            .and_where(Expr::col(Diary::UserId).eq(user_id.into()))
            .and_where(Expr::col(Diary::Date).eq(date.to_string()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, DiaryRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    /// Diaries of a calendar month, by date.
    pub async fn month(
        &self,
        user_id: impl Into<String>,
        year: i32,
        month: u32,
    ) -> anyhow::Result<Vec<DiaryRow>> {
        let Some((first, last)) = month_bounds(year, month) else {
            anyhow::bail!("{year}-{month} is not a calendar month");
        };

        let statement = select()
            .and_where(Expr::col(Diary::UserId).eq(user_id.into()))
            .and_where(Expr::col(Diary::Date).gte(first.to_string()))
            .and_where(Expr::col(Diary::Date).lte(last.to_string()))
            .order_by(Diary::Date, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, DiaryRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}

fn select() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            Diary::Id,
            Diary::UserId,
            Diary::Date,
            Diary::Title,
            Diary::Content,
            Diary::CanvasPath,
            Diary::CreatedAt,
            Diary::UpdatedAt,
        ])
        .from(Diary::Table)
        .to_owned()
}
