use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use oneday_stopwatch::{DaySummary, RecordInput};
use serde_json::{Value, json};

use crate::error::ApiResult;

use super::{
    AppState, DayParams,
    extract::{Json, Query},
};

/// POST /api/stopwatch
#[tracing::instrument(skip_all, fields(user_id = %input.user_id))]
pub async fn record(
    State(state): State<AppState>,
    Json(input): Json<RecordInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let id = state.stopwatch_command.record(input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// GET /api/stopwatch?userId&date
pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<DayParams>,
) -> ApiResult<Json<DaySummary>> {
    let summary = oneday_stopwatch::Query(state.pool.clone())
        .summary(params.user_id, params.date)
        .await?;

    Ok(Json(summary))
}

/// DELETE /api/stopwatch/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.stopwatch_command.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
