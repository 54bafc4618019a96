//! WebSocket entry point for `/ws/...`.
//!
//! Each feed binds one connection to one topic:
//! - `/ws/rollcall/courses/{course_id}` → active-session feed for a course
//! - `/ws/rollcall/sessions/{session_id}` → record-set feed for a session
//! - `/ws/buzzer/courses/{course_id}` → latest-round feed for a course

use axum::Router;
use util::state::AppState;

use crate::ws::{buzzer::ws_buzzer_routes, rollcall::ws_rollcall_routes};

pub mod buzzer;
pub mod core;
pub mod rollcall;

pub fn ws_routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/rollcall", ws_rollcall_routes())
        .nest("/buzzer", ws_buzzer_routes())
        .with_state(app_state)
}
