use std::{str::FromStr, time::Duration};

use anyhow::Result;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{ConnectOptions, SqlitePool};
use sqlx_migrator::{Migrate, Plan};
use tracing::log::LevelFilter;

/// How a pool is going to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PoolKind {
    /// Queries only, many connections.
    Read(u32),
    /// Every mutation and transaction, one connection so writers never
    /// contend for the SQLite lock.
    Write,
    /// Reads and writes on the same pool, for the CLI and tests.
    Shared(u32),
}

impl PoolKind {
    fn max_connections(self) -> u32 {
        match self {
            PoolKind::Read(max) | PoolKind::Shared(max) => max,
            PoolKind::Write => 1,
        }
    }
}

/// Pragmas are set on the connect options so every pooled connection gets
/// them, not only the first one.
fn connect_options(database_url: &str, kind: PoolKind) -> Result<SqliteConnectOptions> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .busy_timeout(Duration::from_secs(5))
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .pragma("cache_size", "-20000")
        .pragma("temp_store", "memory")
        .log_statements(LevelFilter::Debug);

    Ok(match kind {
        PoolKind::Read(_) => options.read_only(true),
        PoolKind::Write | PoolKind::Shared(_) => options
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal),
    })
}

async fn connect(database_url: &str, kind: PoolKind) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(kind.max_connections())
        .connect_with(connect_options(database_url, kind)?)
        .await?;

    tracing::info!(
        kind = ?kind,
        max_connections = kind.max_connections(),
        "database pool created"
    );

    Ok(pool)
}

/// Read-only pool serving every query. The database must already exist.
pub async fn create_read_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    connect(database_url, PoolKind::Read(max_connections)).await
}

/// Single-connection pool for every write and transaction.
pub async fn create_write_pool(database_url: &str) -> Result<SqlitePool> {
    connect(database_url, PoolKind::Write).await
}

/// Read-write pool for CLI commands and tests.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    connect(database_url, PoolKind::Shared(max_connections)).await
}

/// Applies every pending schema migration.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    let mut conn = pool.acquire().await?;
    oneday_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(())
}
