use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::{sync::mpsc, time};

use super::handler_trait::WsHandler;
use super::runtime::WsContext;
use super::WebSocketManager;

pub struct WsServerOptions {
    pub ws_ping_sec: u64,
    pub enable_app_ping: bool,
}

impl Default for WsServerOptions {
    fn default() -> Self {
        Self {
            ws_ping_sec: 30,
            enable_app_ping: true,
        }
    }
}

/// Runs one WebSocket connection bound to a single topic until it closes.
///
/// Broadcasts on the topic are forwarded to the client; inbound text
/// frames are parsed as `H::In` and handed to the feature handler. An
/// application-level `{"type":"ping"}` is answered with a pong envelope
/// without touching the handler.
pub async fn serve_topic<H: WsHandler>(
    socket: WebSocket,
    manager: WebSocketManager,
    topic: String,
    handler: Arc<H>,
    opts: WsServerOptions,
) {
    let mut rx = manager.subscribe(&topic).await;

    let (mut sink, mut socket_rx) = socket.split();

    // Outbound queue and writer task
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(64);
    let mut writer_task = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            if sink.send(frame).await.is_err() {
                break;
            }
        }
    });

    let ctx = WsContext::new(topic.clone(), manager.clone(), out_tx.clone());

    // S->C: forward broadcasts on this topic
    let forward_task = {
        let out_tx = out_tx.clone();
        let topic = topic.clone();
        tokio::spawn(async move {
            while let Ok(msg) = rx.recv().await {
                if out_tx.send(Message::Text(msg.into())).await.is_err() {
                    tracing::info!("client disconnected while sending to '{topic}'");
                    break;
                }
            }
        })
    };

    // WS-level periodic ping
    let ping_task = {
        let out_tx = out_tx.clone();
        tokio::spawn(async move {
            loop {
                time::sleep(std::time::Duration::from_secs(opts.ws_ping_sec)).await;
                if out_tx.send(Message::Ping(Bytes::new())).await.is_err() {
                    break;
                }
            }
        })
    };

    handler.on_open(&ctx).await;

    // C->S: parse and dispatch
    let mut receive_task = {
        let handler = Arc::clone(&handler);
        let ctx = ctx;
        tokio::spawn(async move {
            while let Some(Ok(msg)) = socket_rx.next().await {
                match msg {
                    Message::Text(text) => {
                        let raw = text.as_str();
                        if opts.enable_app_ping && is_app_ping(raw) {
                            let _ = ctx
                                .reply_text(
                                    serde_json::json!({
                                        "event": "pong",
                                        "topic": ctx.topic,
                                        "payload": {},
                                        "ts": Utc::now().to_rfc3339(),
                                    })
                                    .to_string(),
                                )
                                .await;
                            continue;
                        }
                        match serde_json::from_str::<H::In>(raw) {
                            Ok(parsed) => handler.on_message(&ctx, parsed).await,
                            Err(e) => tracing::warn!(
                                "WS invalid message on '{}': {e}; raw={raw}",
                                ctx.topic
                            ),
                        }
                    }
                    Message::Ping(payload) => {
                        let _ = ctx.reply_pong(payload).await;
                    }
                    Message::Pong(_) => {}
                    Message::Binary(_) => {
                        tracing::warn!("ignoring binary frame on topic '{}'", ctx.topic);
                    }
                    Message::Close(_) => {
                        handler.on_close(&ctx).await;
                        break;
                    }
                }
            }
        })
    };

    // A gone client surfaces on the receive side (Close/None) or on the
    // writer side (send failure). Either one tears the whole connection
    // down right away; the forward task must not linger holding its
    // broadcast receiver until the next message on the topic.
    tokio::select! {
        _ = &mut receive_task => {}
        _ = &mut writer_task => {}
    }
    forward_task.abort();
    ping_task.abort();
    receive_task.abort();
    writer_task.abort();
    tracing::info!("WS session ended for topic '{topic}'");
}

fn is_app_ping(raw: &str) -> bool {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) {
        if let Some(Value::String(t)) = map.get("type") {
            return t == "ping";
        }
    }
    false
}
