use axum::{
    routing::{get, post, put},
    Router,
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod put;

/// Routes nested under `/courses/{course_id}/rollcalls`.
pub fn course_rollcall_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(post::start_rollcall).get(get::session_history))
        .route("/active", get(get::active_session))
}

/// Routes nested under `/rollcalls`, addressing a session directly.
pub fn rollcall_routes() -> Router<AppState> {
    Router::new()
        .route("/{session_id}/stop", put(put::stop_rollcall))
        .route("/{session_id}/check-in", post(post::check_in))
        .route("/{session_id}/records", get(get::session_records))
        .route("/{session_id}/records/{student_id}", put(put::set_status))
}

/// Routes nested under `/students`.
pub fn student_routes() -> Router<AppState> {
    Router::new().route("/{student_id}/attendance-stats", get(get::student_stats))
}
