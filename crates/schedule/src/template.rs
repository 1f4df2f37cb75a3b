//! Saved schedule presets.
//!
//! A template only stores the metadata of a schedule. Applying it to a date
//! pattern produces an ordinary schedule submission.

use chrono::NaiveDate;
use oneday_db::table::ScheduleTemplate;
use oneday_shared::validation;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::{Command, CreateInput, Created};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateInput {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[validate(length(min = 1, max = 100, message = "title must be 1 to 100 characters"))]
    pub title: String,
    #[validate(regex(path = *validation::CLOCK_TIME, message = "time must be HH:MM"))]
    pub time: Option<String>,
    #[validate(length(max = 30, message = "category must be at most 30 characters"))]
    pub category: Option<String>,
    #[validate(regex(path = *validation::COLOR, message = "color must be #RRGGBB"))]
    pub color: Option<String>,
    #[serde(default)]
    pub reminder: bool,
}

/// Date pattern a template is applied to.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyTemplateInput {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub selected_days: Vec<u8>,
    #[serde(default)]
    pub selected_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub time: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub reminder: bool,
}

const COLUMNS: [ScheduleTemplate; 7] = [
    ScheduleTemplate::Id,
    ScheduleTemplate::UserId,
    ScheduleTemplate::Title,
    ScheduleTemplate::Time,
    ScheduleTemplate::Category,
    ScheduleTemplate::Color,
    ScheduleTemplate::Reminder,
];

impl Command {
    pub async fn create_template(
        &self,
        input: CreateTemplateInput,
    ) -> oneday_shared::Result<String> {
        input.validate()?;

        let id = ulid::Ulid::new().to_string();
        let statement = Query::insert()
            .into_table(ScheduleTemplate::Table)
            .columns([
                ScheduleTemplate::Id,
                ScheduleTemplate::UserId,
                ScheduleTemplate::Title,
                ScheduleTemplate::Time,
                ScheduleTemplate::Category,
                ScheduleTemplate::Color,
                ScheduleTemplate::Reminder,
                ScheduleTemplate::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                input.user_id.into(),
                input.title.into(),
                input.time.into(),
                input.category.into(),
                input.color.into(),
                input.reminder.into(),
                chrono::Utc::now().timestamp().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(id)
    }

    pub async fn delete_template(&self, id: impl Into<String>) -> oneday_shared::Result<()> {
        let statement = Query::delete()
            .from_table(ScheduleTemplate::Table)
            .and_where(Expr::col(ScheduleTemplate::Id).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            return Err(oneday_shared::Error::NotFound);
        }

        Ok(())
    }

    /// Creates a schedule series from the template metadata.
    pub async fn apply_template(
        &self,
        id: impl Into<String>,
        input: ApplyTemplateInput,
    ) -> oneday_shared::Result<Created> {
        let Some(template) = find_template(&self.read_db, id.into()).await? else {
            return Err(oneday_shared::Error::NotFound);
        };

        self.create(CreateInput {
            user_id: Some(template.user_id),
            title: Some(template.title),
            start_date: input.start_date,
            end_date: input.end_date,
            selected_days: input.selected_days,
            selected_dates: input.selected_dates,
            time: template.time,
            category: template.category,
            color: template.color,
            reminder: template.reminder,
        })
        .await
    }
}

impl crate::Query {
    pub async fn templates(&self, user_id: impl Into<String>) -> anyhow::Result<Vec<TemplateRow>> {
        let statement = Query::select()
            .columns(COLUMNS)
            .from(ScheduleTemplate::Table)
            .and_where(Expr::col(ScheduleTemplate::UserId).eq(user_id.into()))
            .order_by(ScheduleTemplate::Title, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TemplateRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}

async fn find_template(
    pool: &sqlx::SqlitePool,
    id: String,
) -> oneday_shared::Result<Option<TemplateRow>> {
    let statement = Query::select()
        .columns(COLUMNS)
        .from(ScheduleTemplate::Table)
        .and_where(Expr::col(ScheduleTemplate::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, TemplateRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}
