use super::common::RollcallIncoming;
use serde_json::json;
use util::ws::handler_trait::WsHandler;
use util::ws::runtime::WsContext;

pub struct RollcallWsHandler;

impl WsHandler for RollcallWsHandler {
    type In = RollcallIncoming;

    async fn on_message(&self, ctx: &WsContext, _msg: Self::In) {
        // Explicit app-level pong (framework auto-pongs to {"type":"ping"} too)
        let _ = ctx
            .reply_text(
                json!({
                    "event": "pong",
                    "topic": ctx.topic,
                    "payload": {},
                    "ts": chrono::Utc::now().to_rfc3339(),
                })
                .to_string(),
            )
            .await;
    }
}
