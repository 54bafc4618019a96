use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::response::ApiResponse;
use crate::routes::common::service_error;
use crate::ws::rollcall::{emit, payload};
use services::rollcall::RollcallManager;
use util::state::AppState;

use super::common::{RollcallRecordResponse, RollcallSessionResponse, SetStatusReq};
use super::post::broadcast_records;

/// PUT /api/rollcalls/{session_id}/stop
///
/// Stops the session if it is still open. Stopping an already-closed
/// session is a no-op and returns the session as it stands.
///
/// ### Responses
/// - `200 OK` with the (now closed) session
/// - `404 Not Found` for an unknown session
pub async fn stop_rollcall(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<RollcallSessionResponse>>) {
    match RollcallManager::stop(state.db(), session_id).await {
        Ok(session) => {
            let course_id = session.course_id;
            // the course feed sees whatever is active now, usually nothing
            match RollcallManager::active_session(state.db(), course_id).await {
                Ok(active) => {
                    emit::active_session_changed(
                        state.ws(),
                        payload::ActiveSessionChanged {
                            course_id,
                            session: active.map(Into::into),
                        },
                    )
                    .await;
                }
                Err(e) => tracing::error!(course_id, "failed to load active session: {e}"),
            }
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    session.into(),
                    "Roll-call session stopped",
                )),
            )
        }
        Err(e) => service_error(e),
    }
}

/// PUT /api/rollcalls/{session_id}/records/{student_id}
///
/// Teacher override: sets the student's status directly, creating the
/// record if the student never checked in. Bypasses arbitration.
///
/// ### Responses
/// - `200 OK` with the written record
/// - `404 Not Found` for an unknown session
pub async fn set_status(
    State(state): State<AppState>,
    Path((session_id, student_id)): Path<(i64, i64)>,
    Json(body): Json<SetStatusReq>,
) -> (StatusCode, Json<ApiResponse<RollcallRecordResponse>>) {
    match RollcallManager::set_status(state.db(), session_id, student_id, body.status).await {
        Ok(record) => {
            broadcast_records(&state, session_id).await;
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    record.into(),
                    "Attendance status updated",
                )),
            )
        }
        Err(e) => service_error(e),
    }
}
