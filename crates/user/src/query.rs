use oneday_db::table::User;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: i64,
}

pub enum FindType {
    Id(String),
    Email(String),
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn find(&self, find_type: FindType) -> anyhow::Result<Option<UserRow>> {
        let mut statement = sea_query::Query::select()
            .columns([User::Id, User::Name, User::Email, User::CreatedAt])
            .from(User::Table)
            .limit(1)
            .to_owned();

        match find_type {
            FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
            FindType::Email(email) => {
                statement.and_where(Expr::col(User::Email).eq(email.to_lowercase()))
            }
        };

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}
