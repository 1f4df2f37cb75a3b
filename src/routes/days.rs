//! Autosaved day drafts.
//!
//! Reads are served from the day cache first. Writes are acknowledged
//! immediately and persisted once the debounce period passes.

use axum::{extract::State, http::StatusCode};
use oneday_daycache::DayKey;
use oneday_health::{DayLog, FoodInput, MealInput};
use serde::Deserialize;
use oneday_shared::Error;
use serde_json::{Value, json};
use validator::Validate;

use crate::error::ApiResult;

use super::{
    AppState, DayParams,
    extract::{Json, Query},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DayDraft {
    #[serde(flatten)]
    pub params: DayParams,
    #[serde(flatten)]
    pub log: DayLog,
}

/// GET /api/days?userId&date
pub async fn read(
    State(state): State<AppState>,
    Query(params): Query<DayParams>,
) -> ApiResult<Json<DayLog>> {
    let key = DayKey::new(params.user_id, params.date);

    if let Some(log) = state.days.read(&key).await {
        return Ok(Json(log));
    }

    let query = oneday_health::Query(state.pool.clone());
    let meals = query.meals(key.user_id.to_owned(), key.date).await?;
    let steps = query.steps(key.user_id.to_owned(), key.date).await?;

    Ok(Json(DayLog {
        meals: meals
            .meals
            .into_iter()
            .map(|meal| MealInput {
                meal_type: meal.meal_type,
                foods: meal
                    .foods
                    .into_iter()
                    .map(|food| FoodInput {
                        name: food.name,
                        grams: food.grams,
                        calories: food.calories,
                        carbs: food.carbs,
                        protein: food.protein,
                        fat: food.fat,
                    })
                    .collect(),
            })
            .collect(),
        steps: steps.map(|row| row.steps),
    }))
}

/// PUT /api/days
#[tracing::instrument(skip_all, fields(user_id = %draft.params.user_id, date = %draft.params.date))]
pub async fn write(
    State(state): State<AppState>,
    Json(draft): Json<DayDraft>,
) -> ApiResult<StatusCode> {
    if draft.params.user_id.is_empty() {
        return Err(Error::InvalidInput("userId is required".to_owned()).into());
    }
    draft.log.validate().map_err(Error::from)?;

    let key = DayKey::new(draft.params.user_id, draft.params.date);
    state.days.write(key, draft.log).await?;

    Ok(StatusCode::ACCEPTED)
}

/// DELETE /api/days?userId&date
///
/// Drops the cached draft without persisting it.
pub async fn invalidate(
    State(state): State<AppState>,
    Query(params): Query<DayParams>,
) -> StatusCode {
    state
        .days
        .invalidate(&DayKey::new(params.user_id, params.date))
        .await;

    StatusCode::NO_CONTENT
}

/// POST /api/days/flush
///
/// Persists every pending draft now.
#[tracing::instrument(skip(state))]
pub async fn flush(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let flushed = state.days.flush_all().await?;

    Ok(Json(json!({ "flushed": flushed })))
}
