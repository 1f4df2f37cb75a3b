use std::{path::Path, str::FromStr};

use sqlx::sqlite::SqliteConnectOptions;

use oneday::Config;

/// Creates the database if needed and applies pending migrations.
#[tracing::instrument(skip(config))]
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Running database migrations...");

    let pool = oneday::create_pool(&config.database.url, 1).await?;
    oneday::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

/// Removes the database file and migrates from scratch.
#[tracing::instrument(skip(config))]
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Resetting database...");

    let options = SqliteConnectOptions::from_str(&config.database.url)?;
    let filename = options.get_filename();

    if filename != Path::new(":memory:") && filename.exists() {
        tracing::warn!(path = %filename.display(), "Dropping existing database");
        std::fs::remove_file(filename)?;

        for suffix in ["-wal", "-shm"] {
            let mut sidecar = filename.as_os_str().to_owned();
            sidecar.push(suffix);
            if Path::new(&sidecar).exists() {
                std::fs::remove_file(&sidecar)?;
            }
        }
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    migrate(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}
