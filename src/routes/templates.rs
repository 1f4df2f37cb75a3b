use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use oneday_schedule::{ApplyTemplateInput, CreateTemplateInput, TemplateRow};
use serde_json::{Value, json};

use crate::error::ApiResult;

use super::{
    AppState, UserParams,
    extract::{Json, Query},
};

/// POST /api/templates
#[tracing::instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTemplateInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let id = state.schedule_command.create_template(input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// GET /api/templates?userId
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> ApiResult<Json<Vec<TemplateRow>>> {
    let templates = oneday_schedule::Query(state.pool.clone())
        .templates(params.user_id)
        .await?;

    Ok(Json(templates))
}

/// DELETE /api/templates/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.schedule_command.delete_template(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/templates/{id}/apply
#[tracing::instrument(skip(state))]
pub async fn apply(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ApplyTemplateInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let created = state.schedule_command.apply_template(id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "schedule created",
            "seriesId": created.series_id,
            "count": created.dates.len(),
        })),
    ))
}
