use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use oneday_schedule::{CreateInput, ScheduleRow, UpdateInput};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiResult;

use super::{
    AppState, RangeParams,
    extract::{Json, Query},
};

#[derive(Debug, Deserialize)]
pub struct CompletedInput {
    pub completed: bool,
}

/// POST /api/schedules
///
/// Expands the submission into one row per occurrence, all or nothing.
#[tracing::instrument(skip_all, fields(user_id = input.user_id.as_deref()))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let created = state.schedule_command.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "schedule created",
            "seriesId": created.series_id,
            "count": created.dates.len(),
        })),
    ))
}

/// GET /api/schedules?userId&from&to
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<Vec<ScheduleRow>>> {
    let rows = oneday_schedule::Query(state.pool.clone())
        .list(params.user_id, params.from, params.to)
        .await?;

    Ok(Json(rows))
}

/// PUT /api/schedules/{id}
#[tracing::instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateInput>,
) -> ApiResult<StatusCode> {
    state.schedule_command.update(id, input).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/schedules/{id}/completed
#[tracing::instrument(skip(state))]
pub async fn set_completed(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CompletedInput>,
) -> ApiResult<StatusCode> {
    state
        .schedule_command
        .set_completed(id, input.completed)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/schedules/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.schedule_command.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/schedules/series/{series_id}
#[tracing::instrument(skip(state))]
pub async fn delete_series(
    State(state): State<AppState>,
    Path(series_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let deleted = state.schedule_command.delete_series(series_id).await?;

    Ok(Json(json!({ "deleted": deleted })))
}
