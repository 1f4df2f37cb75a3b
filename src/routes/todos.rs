use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use oneday_todo::{CreateInput, TodoRow, UpdateInput};
use serde_json::{Value, json};

use crate::error::ApiResult;

use super::{
    AppState, RangeParams,
    extract::{Json, Query},
};

/// POST /api/todos
#[tracing::instrument(skip_all, fields(user_id = input.user_id.as_deref()))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let created = state.todo_command.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "todo created",
            "seriesId": created.series_id,
            "count": created.dates.len(),
        })),
    ))
}

/// GET /api/todos?userId&from&to
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<Vec<TodoRow>>> {
    let rows = oneday_todo::Query(state.pool.clone())
        .list(params.user_id, params.from, params.to)
        .await?;

    Ok(Json(rows))
}

/// PUT /api/todos/{id}/toggle
#[tracing::instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let completed = state.todo_command.toggle(id).await?;

    Ok(Json(json!({ "completed": completed })))
}

/// PUT /api/todos/{id}
#[tracing::instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateInput>,
) -> ApiResult<StatusCode> {
    state.todo_command.update(id, input).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/todos/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.todo_command.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/todos/series/{series_id}
#[tracing::instrument(skip(state))]
pub async fn delete_series(
    State(state): State<AppState>,
    Path(series_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let deleted = state.todo_command.delete_series(series_id).await?;

    Ok(Json(json!({ "deleted": deleted })))
}
