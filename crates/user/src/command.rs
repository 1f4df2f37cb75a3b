use std::ops::Deref;

use oneday_db::table::User;
use sea_query::{Query, SqliteQueryBuilder};
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

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 50, message = "name must be 1 to 50 characters"))]
    pub name: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
}

impl Command {
    pub async fn register(&self, input: RegisterInput) -> oneday_shared::Result<String> {
        input.validate()?;

        let id = ulid::Ulid::new().to_string();
        let statement = Query::insert()
            .into_table(User::Table)
            .columns([User::Id, User::Name, User::Email, User::CreatedAt])
            .values_panic([
                id.to_owned().into(),
                input.name.into(),
                input.email.to_lowercase().into(),
                chrono::Utc::now().timestamp().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await
            .map_err(|err| match oneday_shared::Error::from(err) {
                oneday_shared::Error::Conflict(_) => {
                    oneday_shared::Error::Conflict("email already registered".to_owned())
                }
                err => err,
            })?;

        tracing::info!(user_id = %id, "user registered");

        Ok(id)
    }
}
