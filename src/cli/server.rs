use anyhow::Result;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use oneday::{AppState, Config};

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting oneday server...");

    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    // Single writer, the migration runs on it before readers open the file.
    let write_pool = oneday::create_write_pool(&config.database.url).await?;
    oneday::migrate(&write_pool).await?;

    let read_pool =
        oneday::create_read_pool(&config.database.url, config.database.max_connections).await?;

    let state = AppState::new(
        oneday_shared::State {
            read_db: read_pool.clone(),
            write_db: write_pool.clone(),
        },
        &config.storage.canvas_dir,
        config.cache.debounce(),
    );
    let days = state.days.clone();

    let app = oneday::router(state)
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Flushing pending day drafts...");
    match days.flush_all().await {
        Ok(flushed) => tracing::info!(flushed, "Day drafts flushed"),
        Err(err) => tracing::error!("failed to flush day drafts: {err:?}"),
    }

    tracing::info!("Closing database pools...");
    read_pool.close().await;
    write_pool.close().await;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}
