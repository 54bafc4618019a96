use axum::{routing::get, Router};
use util::state::AppState;

pub mod common;
pub mod emit;
pub mod handlers;
pub mod payload;
pub mod topics;
pub mod ws_handlers;

use handlers::{rollcall_course_ws_handler, rollcall_session_ws_handler};

pub fn ws_rollcall_routes() -> Router<AppState> {
    Router::new()
        .route("/courses/{course_id}", get(rollcall_course_ws_handler))
        .route("/sessions/{session_id}", get(rollcall_session_ws_handler))
}
