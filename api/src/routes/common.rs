//! Helpers shared by the route modules.

use crate::response::ApiResponse;
use axum::{http::StatusCode, Json};
use serde::Serialize;
use services::ServiceError;

/// Maps a [`ServiceError`] to a status code and a wrapped error body.
///
/// Database failures are logged and reported generically; their details
/// stay out of the response.
pub fn service_error<T>(err: ServiceError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    let (status, message) = match &err {
        ServiceError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
        ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::Db(e) => {
            tracing::error!("database error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };
    (status, Json(ApiResponse::error(message)))
}
