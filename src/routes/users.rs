use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use oneday_user::{FindType, RegisterInput, UserRow};
use serde_json::{Value, json};

use crate::error::{ApiError, ApiResult};

use super::{AppState, extract::Json};

/// POST /api/users
#[tracing::instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let id = state.user_command.register(input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// GET /api/users/{id}
pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserRow>> {
    let user = oneday_user::Query(state.pool.clone())
        .find(FindType::Id(id))
        .await?;

    user.map(Json)
        .ok_or(ApiError(oneday_shared::Error::NotFound))
}
