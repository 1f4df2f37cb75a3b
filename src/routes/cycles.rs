use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use oneday_health::{AddCycleInput, CycleHistory};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiResult;

use super::{
    AppState,
    extract::{Json, Query},
};

/// `?userId=..&today=..`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HistoryParams {
    pub user_id: String,
    /// The client's local date, `dDay` is counted from it. Defaults to the
    /// UTC date.
    pub today: Option<NaiveDate>,
}

/// GET /api/cycles?userId&today
///
/// History newest first, `prediction` is null below two recorded periods.
pub async fn history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<CycleHistory>> {
    let today = params
        .today
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let history = oneday_health::Query(state.pool.clone())
        .cycle_history(params.user_id, today)
        .await?;

    Ok(Json(history))
}

/// POST /api/cycles
#[tracing::instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(input): Json<AddCycleInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let id = state.health_command.add_cycle(input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// DELETE /api/cycles/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.health_command.delete_cycle(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
