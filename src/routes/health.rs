use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use sqlx::SqlitePool;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /ready
///
/// Ready once the pool can run a query against a migrated schema.
pub async fn ready(State(pool): State<SqlitePool>) -> (StatusCode, Json<Value>) {
    let probe = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'schedule'",
    )
    .fetch_one(&pool)
    .await;

    match probe {
        Ok(1) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "connections": pool.size(),
                "idle": pool.num_idle(),
            })),
        ),
        Ok(_) => {
            tracing::warn!("Readiness check failed: schema not migrated");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "not_ready", "reason": "schema_missing" })),
            )
        }
        Err(err) => {
            tracing::error!("Readiness check failed: database unavailable - {err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "not_ready", "reason": "database_unavailable" })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        crate::db::create_pool(":memory:", 1).await.unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_version() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_ready_after_migration() {
        let pool = memory_pool().await;
        crate::db::migrate(&pool).await.unwrap();

        let (status, Json(body)) = ready(State(pool)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn test_not_ready_without_schema() {
        let (status, Json(body)) = ready(State(memory_pool().await)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["reason"], "schema_missing");
    }

    #[tokio::test]
    async fn test_not_ready_with_closed_pool() {
        let pool = memory_pool().await;
        pool.close().await;

        let (status, Json(body)) = ready(State(pool)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["reason"], "database_unavailable");
    }
}
