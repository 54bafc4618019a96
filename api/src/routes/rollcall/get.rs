use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::response::ApiResponse;
use crate::routes::common::service_error;
use services::rollcall::{RollcallManager, StudentStats};
use util::state::AppState;

use super::common::{RollcallRecordResponse, RollcallSessionResponse};

/// GET /api/courses/{course_id}/rollcalls/active
///
/// The currently open session for the course, or `null`.
pub async fn active_session(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Option<RollcallSessionResponse>>>) {
    match RollcallManager::active_session(state.db(), course_id).await {
        Ok(session) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                session.map(Into::into),
                "Active roll-call session fetched",
            )),
        ),
        Err(e) => service_error(e),
    }
}

/// GET /api/courses/{course_id}/rollcalls
///
/// All sessions of the course, most recent first.
pub async fn session_history(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Vec<RollcallSessionResponse>>>) {
    match RollcallManager::session_history(state.db(), course_id).await {
        Ok(sessions) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                sessions.into_iter().map(Into::into).collect(),
                "Roll-call history fetched",
            )),
        ),
        Err(e) => service_error(e),
    }
}

/// GET /api/rollcalls/{session_id}/records
///
/// Every check-in record of the session, oldest first.
pub async fn session_records(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Vec<RollcallRecordResponse>>>) {
    match RollcallManager::records(state.db(), session_id).await {
        Ok(records) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                records.into_iter().map(Into::into).collect(),
                "Roll-call records fetched",
            )),
        ),
        Err(e) => service_error(e),
    }
}

/// GET /api/students/{student_id}/attendance-stats
///
/// Attendance totals for one student across all sessions; every status
/// except absent counts as attended.
pub async fn student_stats(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Option<StudentStats>>>) {
    match RollcallManager::student_stats(state.db(), student_id).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(stats),
                "Attendance stats fetched",
            )),
        ),
        Err(e) => service_error(e),
    }
}
