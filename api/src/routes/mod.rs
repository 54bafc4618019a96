//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain:
//! - `/health` → liveness probe
//! - `/courses/{course_id}/rollcalls` → roll-call lifecycle per course
//! - `/rollcalls/{session_id}/...` → check-in, records, and overrides
//! - `/courses/{course_id}/buzzers` → buzzer round lifecycle per course
//! - `/buzzers/{round_id}/...` → buzz arbitration and stop
//! - `/students/{student_id}/...` → per-student attendance totals

use axum::Router;
use util::state::AppState;

pub mod buzzer;
pub mod common;
pub mod health;
pub mod rollcall;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router carries `AppState` (database pool plus the
/// WebSocket fan-out manager) so mutation handlers can broadcast the
/// resulting state on the live feeds.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest(
            "/courses/{course_id}/rollcalls",
            rollcall::course_rollcall_routes(),
        )
        .nest("/rollcalls", rollcall::rollcall_routes())
        .nest(
            "/courses/{course_id}/buzzers",
            buzzer::course_buzzer_routes(),
        )
        .nest("/buzzers", buzzer::buzzer_routes())
        .nest("/students", rollcall::student_routes())
        .with_state(app_state)
}
