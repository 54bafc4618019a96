use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::response::ApiResponse;
use crate::routes::common::service_error;
use services::buzzer::BuzzerManager;
use util::state::AppState;

use super::common::BuzzerRoundResponse;

/// GET /api/courses/{course_id}/buzzers/latest
///
/// The most recently started round for the course, open or closed, or
/// `null` when the course never ran one.
pub async fn latest_round(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Option<BuzzerRoundResponse>>>) {
    match BuzzerManager::latest_round(state.db(), course_id).await {
        Ok(round) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                round.map(Into::into),
                "Latest buzzer round fetched",
            )),
        ),
        Err(e) => service_error(e),
    }
}
