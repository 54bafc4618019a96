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
use super::post::broadcast_latest_round;

/// PUT /api/buzzers/{round_id}/stop
///
/// Closes the round without a winner. A no-op on an already-closed
/// round; a recorded winner is never cleared.
///
/// ### Responses
/// - `200 OK` with the round as it stands
/// - `404 Not Found` for an unknown round
pub async fn stop_round(
    State(state): State<AppState>,
    Path(round_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<BuzzerRoundResponse>>) {
    match BuzzerManager::stop(state.db(), round_id).await {
        Ok(round) => {
            let course_id = round.course_id;
            let resp = BuzzerRoundResponse::from(round);
            broadcast_latest_round(&state, course_id).await;
            (
                StatusCode::OK,
                Json(ApiResponse::success(resp, "Buzzer round stopped")),
            )
        }
        Err(e) => service_error(e),
    }
}
