use std::ops::Deref;

use chrono::NaiveDate;
use oneday_db::table::Todo;
use oneday_shared::{recurrence::Recurrence, validation};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone)]
pub struct Command(pub oneday_shared::State);

impl Deref for Command {
    type Target = oneday_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInput {
    #[validate(required(message = "userId is required"))]
    pub user_id: Option<String>,
    #[validate(
        required(message = "title is required"),
        length(min = 1, max = 100, message = "title must be 1 to 100 characters")
    )]
    pub title: Option<String>,
    #[validate(required(message = "startDate is required"))]
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub selected_days: Vec<u8>,
    #[serde(default)]
    pub selected_dates: Vec<NaiveDate>,
    #[validate(length(max = 30, message = "category must be at most 30 characters"))]
    pub category: Option<String>,
    #[validate(regex(path = *validation::COLOR, message = "color must be #RRGGBB"))]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
    pub series_id: String,
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInput {
    #[validate(length(min = 1, max = 100, message = "title must be 1 to 100 characters"))]
    pub title: String,
}

impl Command {
    #[tracing::instrument(skip_all, fields(user_id = input.user_id.as_deref()))]
    pub async fn create(&self, input: CreateInput) -> oneday_shared::Result<Created> {
        input.validate()?;

        let (Some(user_id), Some(title), Some(start_date)) =
            (input.user_id, input.title, input.start_date)
        else {
            oneday_shared::bail!("required fields missing after validation");
        };

        let dates = Recurrence::new(start_date)
            .until(input.end_date)
            .on_weekdays(input.selected_days)
            .on_dates(input.selected_dates)
            .expand()?;

        let series_id = ulid::Ulid::new().to_string();
        let created_at = chrono::Utc::now().timestamp();
        let rows = dates
            .iter()
            .map(|date| {
                vec![
                    ulid::Ulid::new().to_string().into(),
                    user_id.to_owned().into(),
                    series_id.to_owned().into(),
                    date.to_string().into(),
                    title.to_owned().into(),
                    input.category.to_owned().into(),
                    input.color.to_owned().into(),
                    false.into(),
                    created_at.into(),
                ]
            })
            .collect::<Vec<Vec<Expr>>>();

        let statement = Query::insert()
            .into_table(Todo::Table)
            .columns([
                Todo::Id,
                Todo::UserId,
                Todo::SeriesId,
                Todo::Date,
                Todo::Title,
                Todo::Category,
                Todo::Color,
                Todo::Completed,
                Todo::CreatedAt,
            ])
            .to_owned();

        oneday_db::transaction(&self.write_db, move |conn| {
            Box::pin(async move { oneday_db::insert_chunked(conn, &statement, rows).await })
        })
        .await?;

        tracing::info!(series_id = %series_id, count = dates.len(), "todo created");

        Ok(Created { series_id, dates })
    }

    /// Flips the completed flag and returns its new value.
    pub async fn toggle(&self, id: impl Into<String>) -> oneday_shared::Result<bool> {
        let statement = Query::update()
            .table(Todo::Table)
            .value(Todo::Completed, Expr::col(Todo::Completed).not())
            .and_where(Expr::col(Todo::Id).eq(id.into()))
            .returning_col(Todo::Completed)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let completed = sqlx::query_scalar_with::<_, bool, _>(&sql, values)
            .fetch_optional(&self.write_db)
            .await?;

        completed.ok_or(oneday_shared::Error::NotFound)
    }

    pub async fn update(
        &self,
        id: impl Into<String>,
        input: UpdateInput,
    ) -> oneday_shared::Result<()> {
        input.validate()?;

        let statement = Query::update()
            .table(Todo::Table)
            .value(Todo::Title, input.title)
            .and_where(Expr::col(Todo::Id).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            return Err(oneday_shared::Error::NotFound);
        }

        Ok(())
    }

    pub async fn delete(&self, id: impl Into<String>) -> oneday_shared::Result<()> {
        let statement = Query::delete()
            .from_table(Todo::Table)
            .and_where(Expr::col(Todo::Id).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            return Err(oneday_shared::Error::NotFound);
        }

        Ok(())
    }

    pub async fn delete_series(&self, series_id: impl Into<String>) -> oneday_shared::Result<u64> {
        let statement = Query::delete()
            .from_table(Todo::Table)
            .and_where(Expr::col(Todo::SeriesId).eq(series_id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        match result.rows_affected() {
            0 => Err(oneday_shared::Error::NotFound),
            n => Ok(n),
        }
    }
}
