use axum::{extract::State, http::StatusCode};
use oneday_health::{StepRow, StepsInput};

use crate::error::ApiResult;

use super::{
    AppState, DayParams, RangeParams,
    extract::{Json, Query},
};

/// PUT /api/steps
#[tracing::instrument(skip(state))]
pub async fn upsert(
    State(state): State<AppState>,
    Json(input): Json<StepsInput>,
) -> ApiResult<StatusCode> {
    state.health_command.upsert_steps(input).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/steps?userId&date
///
/// A day without a record reports zero steps.
pub async fn day(
    State(state): State<AppState>,
    Query(params): Query<DayParams>,
) -> ApiResult<Json<StepRow>> {
    let row = oneday_health::Query(state.pool.clone())
        .steps(params.user_id, params.date)
        .await?
        .unwrap_or(StepRow {
            date: params.date,
            steps: 0,
        });

    Ok(Json(row))
}

/// GET /api/steps/range?userId&from&to
pub async fn range(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<Vec<StepRow>>> {
    let rows = oneday_health::Query(state.pool.clone())
        .steps_range(params.user_id, params.from, params.to)
        .await?;

    Ok(Json(rows))
}
