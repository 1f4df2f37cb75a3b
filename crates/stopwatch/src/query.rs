use std::collections::BTreeMap;

use chrono::NaiveDate;
use oneday_db::table::StopwatchRecord;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecordRow {
    pub id: String,
    pub date: NaiveDate,
    pub task: String,
    pub category: Option<String>,
    pub started_at: i64,
    pub ended_at: i64,
    pub duration_secs: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: Option<String>,
    pub total_secs: i64,
    pub sessions: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_secs: i64,
    pub categories: Vec<CategoryTotal>,
    pub records: Vec<RecordRow>,
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn day(
        &self,
        user_id: impl Into<String>,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<RecordRow>> {
        let statement = sea_query::Query::select()
            .columns([
                StopwatchRecord::Id,
                StopwatchRecord::Date,
                StopwatchRecord::Task,
                StopwatchRecord::Category,
                StopwatchRecord::StartedAt,
                StopwatchRecord::EndedAt,
                StopwatchRecord::DurationSecs,
            ])
            .from(StopwatchRecord::Table)
            .and_where(Expr::col(StopwatchRecord::UserId).eq(user_id.into()))
            .and_where(Expr::col(StopwatchRecord::Date).eq(date.to_string()))
            .order_by(StopwatchRecord::StartedAt, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecordRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    /// Records of a day with time totals per category, largest first.
    pub async fn summary(
        &self,
        user_id: impl Into<String>,
        date: NaiveDate,
    ) -> anyhow::Result<DaySummary> {
        let records = self.day(user_id, date).await?;

        let mut totals = BTreeMap::<Option<String>, (i64, usize)>::new();
        for record in &records {
            let total = totals.entry(record.category.to_owned()).or_default();
            total.0 += record.duration_secs;
            total.1 += 1;
        }

        let mut categories = totals
            .into_iter()
            .map(|(category, (total_secs, sessions))| CategoryTotal {
                category,
                total_secs,
                sessions,
            })
            .collect::<Vec<_>>();
        categories.sort_by(|a, b| b.total_secs.cmp(&a.total_secs));

        Ok(DaySummary {
            date,
            total_secs: categories.iter().map(|c| c.total_secs).sum(),
            categories,
            records,
        })
    }
}
