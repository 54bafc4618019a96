use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::IntoResponse,
};
use std::sync::Arc;
use util::state::AppState;
use util::ws::axum_adapter::ws_route;
use util::ws::serve::WsServerOptions;

use super::topics::{rollcall_course_topic, rollcall_session_topic};
use super::ws_handlers::RollcallWsHandler;

/// GET /ws/rollcall/courses/{course_id}
pub async fn rollcall_course_ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    let handler = Arc::new(RollcallWsHandler);
    let topic = move || rollcall_course_topic(course_id);
    ws_route(
        ws,
        State(app_state),
        topic,
        handler,
        WsServerOptions::default(),
    )
    .await
}

/// GET /ws/rollcall/sessions/{session_id}
pub async fn rollcall_session_ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    Path(session_id): Path<i64>,
) -> impl IntoResponse {
    let handler = Arc::new(RollcallWsHandler);
    let topic = move || rollcall_session_topic(session_id);
    ws_route(
        ws,
        State(app_state),
        topic,
        handler,
        WsServerOptions::default(),
    )
    .await
}
