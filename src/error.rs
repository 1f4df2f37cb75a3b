use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use oneday_shared::validation::field_messages;
use serde_json::json;

/// Error returned by every API handler.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub oneday_shared::Error);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(oneday_shared::Error::Unknown(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use oneday_shared::Error;

        let (status, body) = match self.0 {
            Error::Validate(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "ValidationFailed",
                    "message": "Invalid input provided.",
                    "details": field_messages(&errors),
                }),
            ),
            Error::InvalidInput(message) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "InvalidInput",
                    "message": message,
                }),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "NotFound",
                    "message": "The requested resource could not be found.",
                }),
            ),
            Error::Conflict(message) => (
                StatusCode::CONFLICT,
                json!({
                    "error": "Conflict",
                    "message": message,
                }),
            ),
            Error::Server(message) => {
                tracing::error!("Internal server error: {message}");
                internal_error()
            }
            Error::Unknown(err) => {
                tracing::error!("Internal server error: {err:?}");
                internal_error()
            }
        };

        (status, Json(body)).into_response()
    }
}

fn internal_error() -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({
            "error": "InternalServerError",
            "message": "An unexpected error occurred. Please try again later.",
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError(oneday_shared::Error::InvalidInput("bad".to_owned())),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError(oneday_shared::Error::NotFound), StatusCode::NOT_FOUND),
            (
                ApiError(oneday_shared::Error::Conflict("taken".to_owned())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError(oneday_shared::Error::Server("boom".to_owned())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::from(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
