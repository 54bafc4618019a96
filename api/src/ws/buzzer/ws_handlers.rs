use super::common::BuzzerIncoming;
use serde_json::json;
use util::ws::handler_trait::WsHandler;
use util::ws::runtime::WsContext;

pub struct BuzzerWsHandler;

impl WsHandler for BuzzerWsHandler {
    type In = BuzzerIncoming;

    async fn on_message(&self, ctx: &WsContext, _msg: Self::In) {
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
