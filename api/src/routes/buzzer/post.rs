use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::response::ApiResponse;
use crate::routes::common::service_error;
use db::models::buzzer_round;
use sea_orm::EntityTrait;
use services::buzzer::{BuzzOutcome, BuzzerManager};
use util::state::AppState;

use super::common::{BuzzReq, BuzzerRoundResponse};

/// POST /api/courses/{course_id}/buzzers
///
/// Starts a buzzer round for the course. Any round still open for the
/// course is closed without a winner first.
///
/// ### Responses
/// - `201 Created` with the new round
pub async fn start_round(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<BuzzerRoundResponse>>) {
    match BuzzerManager::start(state.db(), course_id).await {
        Ok(round) => {
            let resp = BuzzerRoundResponse::from(round);
            broadcast_latest_round(&state, course_id).await;
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(resp, "Buzzer round started")),
            )
        }
        Err(e) => service_error(e),
    }
}

/// POST /api/buzzers/{round_id}/buzz
///
/// Buzz arbitration: the first buzz on an open round wins it and closes
/// it in the same write. Every later buzz observes the round closed.
///
/// ### Responses
/// - `200 OK` with the closed round when this buzz won
/// - `404 Not Found` for an unknown round
/// - `409 Conflict` when the round was already won or stopped
pub async fn buzz(
    State(state): State<AppState>,
    Path(round_id): Path<i64>,
    Json(body): Json<BuzzReq>,
) -> (StatusCode, Json<ApiResponse<BuzzerRoundResponse>>) {
    match BuzzerManager::buzz(state.db(), round_id, body.student_id).await {
        Ok(BuzzOutcome::Won) => {
            let round = buzzer_round::Entity::find_by_id(round_id)
                .one(state.db())
                .await
                .ok()
                .flatten();
            let Some(round) = round else {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("Failed to load the won round")),
                );
            };
            let course_id = round.course_id;
            let resp = BuzzerRoundResponse::from(round);
            broadcast_latest_round(&state, course_id).await;
            (
                StatusCode::OK,
                Json(ApiResponse::success(resp, "Buzz won the round")),
            )
        }
        Ok(BuzzOutcome::TooLate) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Round is no longer open")),
        ),
        Err(e) => service_error(e),
    }
}

/// Re-emits the latest round for a course on its buzzer feed.
pub(super) async fn broadcast_latest_round(state: &AppState, course_id: i64) {
    use crate::ws::buzzer::{emit, payload};

    match BuzzerManager::latest_round(state.db(), course_id).await {
        Ok(round) => {
            emit::latest_round_changed(
                state.ws(),
                payload::LatestRoundChanged {
                    course_id,
                    round: round.map(Into::into),
                },
            )
            .await;
        }
        Err(e) => tracing::error!(course_id, "failed to load latest round: {e}"),
    }
}
