use axum::{routing::get, Router};
use util::state::AppState;

pub mod common;
pub mod emit;
pub mod handlers;
pub mod payload;
pub mod topics;
pub mod ws_handlers;

use handlers::buzzer_course_ws_handler;

pub fn ws_buzzer_routes() -> Router<AppState> {
    Router::new().route("/courses/{course_id}", get(buzzer_course_ws_handler))
}
