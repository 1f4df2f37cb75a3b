use axum::{extract::State, http::StatusCode};
use oneday_daycache::DayKey;
use oneday_health::{DayMeals, ReplaceMealsInput};

use crate::error::ApiResult;

use super::{
    AppState, DayParams,
    extract::{Json, Query},
};

/// PUT /api/meals
///
/// Writes straight through. The cached draft of the same day is dropped
/// first, so a persist of it that is already running lands before this write.
#[tracing::instrument(skip_all, fields(user_id = %input.user_id, date = %input.date))]
pub async fn replace(
    State(state): State<AppState>,
    Json(input): Json<ReplaceMealsInput>,
) -> ApiResult<StatusCode> {
    let key = DayKey::new(input.user_id.to_owned(), input.date);
    state.days.invalidate(&key).await;
    state.health_command.replace_meals(input).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/meals?userId&date
pub async fn day(
    State(state): State<AppState>,
    Query(params): Query<DayParams>,
) -> ApiResult<Json<DayMeals>> {
    let meals = oneday_health::Query(state.pool.clone())
        .meals(params.user_id, params.date)
        .await?;

    Ok(Json(meals))
}
