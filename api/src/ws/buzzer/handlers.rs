use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::IntoResponse,
};
use std::sync::Arc;
use util::state::AppState;
use util::ws::axum_adapter::ws_route;
use util::ws::serve::WsServerOptions;

use super::topics::buzzer_course_topic;
use super::ws_handlers::BuzzerWsHandler;

/// GET /ws/buzzer/courses/{course_id}
pub async fn buzzer_course_ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    let handler = Arc::new(BuzzerWsHandler);
    let topic = move || buzzer_course_topic(course_id);
    ws_route(
        ws,
        State(app_state),
        topic,
        handler,
        WsServerOptions::default(),
    )
    .await
}
