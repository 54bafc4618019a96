use axum::{
    routing::{get, post, put},
    Router,
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod put;

/// Routes nested under `/courses/{course_id}/buzzers`.
pub fn course_buzzer_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(post::start_round))
        .route("/latest", get(get::latest_round))
}

/// Routes nested under `/buzzers`, addressing a round directly.
pub fn buzzer_routes() -> Router<AppState> {
    Router::new()
        .route("/{round_id}/buzz", post(post::buzz))
        .route("/{round_id}/stop", put(put::stop_round))
}
