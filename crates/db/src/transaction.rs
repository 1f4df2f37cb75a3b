use futures::future::BoxFuture;
use sea_query::{Expr, InsertStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, SqlitePool};

/// Rows per INSERT statement, keeps bound parameters well under SQLite limits.
pub const INSERT_CHUNK: usize = 100;

/// Runs `operation` inside a transaction on `pool`.
///
/// Commits when the operation returns `Ok`, rolls back on every error path,
/// including a failed commit. Dropping the future before completion also
/// rolls back since the underlying transaction is never committed.
pub async fn transaction<T, E, F>(pool: &SqlitePool, operation: F) -> Result<T, E>
where
    F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, E>>,
    E: From<sqlx::Error>,
{
    let mut tx = pool.begin().await?;

    match operation(&mut *tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!("transaction rollback failed: {rollback_err}");
            }

            Err(err)
        }
    }
}

/// Executes `base` once per chunk of `rows`, returns the total affected rows.
pub async fn insert_chunked(
    conn: &mut SqliteConnection,
    base: &InsertStatement,
    rows: Vec<Vec<Expr>>,
) -> Result<u64, sqlx::Error> {
    let mut affected = 0;
    let mut rows = rows.into_iter().peekable();

    while rows.peek().is_some() {
        let mut statement = base.clone();
        for row in rows.by_ref().take(INSERT_CHUNK) {
            statement.values_panic(row);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        affected += sqlx::query_with(&sql, values)
            .execute(&mut *conn)
            .await?
            .rows_affected();
    }

    Ok(affected)
}
