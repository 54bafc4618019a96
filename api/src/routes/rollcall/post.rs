use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::response::ApiResponse;
use crate::routes::common::service_error;
use crate::ws::rollcall::{emit, payload};
use common::format_validation_errors;
use services::rollcall::{CheckInOutcome, RollcallManager};
use util::state::AppState;
use validator::Validate;

use super::common::{CheckInReq, CheckInResponse, CreateRollcallReq, RollcallSessionResponse};

/// POST /api/courses/{course_id}/rollcalls
///
/// Starts a roll-call session for the course. Any session still open for
/// the course is closed first, so at most one is ever active.
///
/// ### Responses
/// - `201 Created` with the new session
/// - `422 Unprocessable Entity` on invalid body
pub async fn start_rollcall(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(body): Json<CreateRollcallReq>,
) -> (StatusCode, Json<ApiResponse<RollcallSessionResponse>>) {
    if let Err(e) = body.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(format_validation_errors(&e))),
        );
    }
    let target = match (body.target_lat, body.target_lng) {
        (Some(lat), Some(lng)) => Some((lat, lng)),
        (None, None) => None,
        _ => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error(
                    "target_lat and target_lng must be provided together",
                )),
            );
        }
    };

    match RollcallManager::start(state.db(), course_id, body.kind, body.duration_minutes, target)
        .await
    {
        Ok(session) => {
            let resp = RollcallSessionResponse::from(session);
            emit::active_session_changed(
                state.ws(),
                payload::ActiveSessionChanged {
                    course_id,
                    session: Some(resp.clone()),
                },
            )
            .await;
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(resp, "Roll-call session started")),
            )
        }
        Err(e) => service_error(e),
    }
}

/// POST /api/rollcalls/{session_id}/check-in
///
/// Arbitrates a student's check-in. The first accepted check-in per
/// (session, student) sticks; its status is present or late depending on
/// elapsed time against the session duration.
///
/// ### Responses
/// - `200 OK` with the assigned status
/// - `404 Not Found` for an unknown session
/// - `409 Conflict` when already checked in or the session is closed
pub async fn check_in(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(body): Json<CheckInReq>,
) -> (StatusCode, Json<ApiResponse<CheckInResponse>>) {
    let coords = match (body.gps_lat, body.gps_lng) {
        (Some(lat), Some(lng)) => Some((lat, lng)),
        _ => None,
    };

    match RollcallManager::check_in(state.db(), session_id, body.student_id, coords).await {
        Ok(CheckInOutcome::Accepted(status)) => {
            broadcast_records(&state, session_id).await;
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    CheckInResponse {
                        session_id,
                        student_id: body.student_id,
                        status: status.to_string(),
                    },
                    "Check-in recorded",
                )),
            )
        }
        Ok(CheckInOutcome::AlreadyCheckedIn) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Student already checked in")),
        ),
        Ok(CheckInOutcome::SessionClosed) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Roll-call session is closed")),
        ),
        Err(e) => service_error(e),
    }
}

/// Re-emits the full record set for a session on its records feed.
pub(super) async fn broadcast_records(state: &AppState, session_id: i64) {
    match RollcallManager::records(state.db(), session_id).await {
        Ok(records) => {
            emit::records_changed(
                state.ws(),
                payload::RecordsChanged {
                    session_id,
                    records: records.into_iter().map(Into::into).collect(),
                },
            )
            .await;
        }
        Err(e) => tracing::error!(session_id, "failed to load records for broadcast: {e}"),
    }
}
