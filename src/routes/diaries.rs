use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use oneday_diary::{DiaryRow, UpsertInput};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{ApiError, ApiResult};

use super::{
    AppState, DayParams,
    extract::{Json, Query},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MonthParams {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
}

/// PUT /api/diaries
///
/// One diary per user and day, a second save replaces the first.
#[tracing::instrument(skip_all, fields(user_id = %input.user_id, date = %input.date))]
pub async fn upsert(
    State(state): State<AppState>,
    Json(input): Json<UpsertInput>,
) -> ApiResult<Json<Value>> {
    let id = state.diary_command.upsert(input).await?;

    Ok(Json(json!({ "id": id })))
}

/// GET /api/diaries?userId&date
pub async fn by_date(
    State(state): State<AppState>,
    Query(params): Query<DayParams>,
) -> ApiResult<Json<DiaryRow>> {
    let diary = oneday_diary::Query(state.pool.clone())
        .by_date(params.user_id, params.date)
        .await?;

    diary
        .map(Json)
        .ok_or(ApiError(oneday_shared::Error::NotFound))
}

/// GET /api/diaries/month?userId&year&month
pub async fn month(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> ApiResult<Json<Vec<DiaryRow>>> {
    if !(1..=12).contains(&params.month) {
        return Err(oneday_shared::Error::InvalidInput(format!(
            "month must be 1 to 12, got {}",
            params.month
        ))
        .into());
    }

    let diaries = oneday_diary::Query(state.pool.clone())
        .month(params.user_id, params.year, params.month)
        .await?;

    Ok(Json(diaries))
}

/// GET /api/diaries/{id}/canvas
pub async fn canvas(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let png = state.diary_command.canvas(id).await?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

/// DELETE /api/diaries/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.diary_command.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
