use std::{ops::Deref, sync::Arc};

use chrono::NaiveDate;
use oneday_db::table::Diary;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use crate::{CanvasStore, check_dir_name, decode_canvas};

#[derive(Clone)]
pub struct Command {
    state: oneday_shared::State,
    canvas: Arc<dyn CanvasStore>,
}

impl Deref for Command {
    type Target = oneday_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertInput {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 100, message = "title must be 1 to 100 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 10000, message = "content must be at most 10000 characters"))]
    pub content: String,
    /// Base64 PNG or PNG data URL.
    pub canvas: Option<String>,
}

impl Command {
    pub fn new(state: oneday_shared::State, canvas: Arc<dyn CanvasStore>) -> Self {
        Self { state, canvas }
    }

    /// Creates or replaces the diary of `(user_id, date)`, returns its id.
    ///
    /// A missing canvas keeps the previously stored one.
    #[tracing::instrument(skip_all, fields(user_id = %input.user_id, date = %input.date))]
    pub async fn upsert(&self, input: UpsertInput) -> oneday_shared::Result<String> {
        input.validate()?;

        let png = input.canvas.as_deref().map(decode_canvas).transpose()?;
        let canvas_path = match png {
            Some(png) => {
                check_dir_name(&input.user_id)?;
                Some(self.canvas.save(&input.user_id, input.date, &png).await?)
            }
            None => None,
        };

        let mut update_columns = vec![Diary::Title, Diary::Content, Diary::UpdatedAt];
        if canvas_path.is_some() {
            update_columns.push(Diary::CanvasPath);
        }

        let now = chrono::Utc::now().timestamp();
        let statement = Query::insert()
            .into_table(Diary::Table)
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
            .values_panic([
                ulid::Ulid::new().to_string().into(),
                input.user_id.into(),
                input.date.to_string().into(),
                input.title.into(),
                input.content.into(),
                canvas_path.into(),
                now.into(),
                now.into(),
            ])
            .on_conflict(
                OnConflict::columns([Diary::UserId, Diary::Date])
                    .update_columns(update_columns)
                    .to_owned(),
            )
            .returning_col(Diary::Id)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_scalar_with::<_, String, _>(&sql, values)
            .fetch_one(&self.write_db)
            .await?;

        Ok(id)
    }

    /// PNG bytes of the canvas attached to diary `id`.
    pub async fn canvas(&self, id: impl Into<String>) -> oneday_shared::Result<Vec<u8>> {
        let Some(diary) = crate::Query(self.read_db.clone()).find(id).await? else {
            return Err(oneday_shared::Error::NotFound);
        };

        let Some(path) = diary.canvas_path else {
            return Err(oneday_shared::Error::NotFound);
        };

        Ok(self.canvas.load(&path).await?)
    }

    /// Deletes a diary and its canvas image.
    pub async fn delete(&self, id: impl Into<String>) -> oneday_shared::Result<()> {
        let statement = Query::delete()
            .from_table(Diary::Table)
            .and_where(Expr::col(Diary::Id).eq(id.into()))
            .returning_col(Diary::CanvasPath)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some(canvas_path) = sqlx::query_scalar_with::<_, Option<String>, _>(&sql, values)
            .fetch_optional(&self.write_db)
            .await?
        else {
            return Err(oneday_shared::Error::NotFound);
        };

        if let Some(path) = canvas_path {
            if let Err(err) = self.canvas.remove(&path).await {
                tracing::warn!(path = %path, "failed to remove canvas: {err}");
            }
        }

        Ok(())
    }
}
