use crate::state::AppState;
use axum::{
    extract::{ws::WebSocket, State, WebSocketUpgrade},
    response::IntoResponse,
};
use std::sync::Arc;

use super::handler_trait::WsHandler;
use super::serve::{serve_topic, WsServerOptions};

/// Upgrades the request and runs [`serve_topic`] for the topic produced
/// by `topic_fn`.
pub async fn ws_route<H, FTopic>(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    topic_fn: FTopic,
    handler: Arc<H>,
    opts: WsServerOptions,
) -> impl IntoResponse
where
    H: WsHandler,
    FTopic: Fn() -> String + Send + 'static,
{
    let ws_manager = state.ws_clone();

    ws.on_upgrade(move |socket: WebSocket| {
        let topic = topic_fn();
        let handler = Arc::clone(&handler);
        let manager = ws_manager.clone();
        async move {
            serve_topic(socket, manager, topic, handler, opts).await;
        }
    })
}
