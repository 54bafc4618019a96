use super::runtime::WsContext;
use serde::de::DeserializeOwned;
use std::future::Future;

/// Per-topic behavior plugged into the serve loop.
pub trait WsHandler: Send + Sync + 'static {
    /// The incoming message type this handler understands.
    type In: DeserializeOwned + Send;

    /// Called once after the socket is subscribed to its topic.
    fn on_open(&self, ctx: &WsContext) -> impl Future<Output = ()> + Send {
        async move {
            let _ = ctx;
        }
    }

    /// Called for every parsed text message of type `Self::In`.
    fn on_message(&self, ctx: &WsContext, msg: Self::In) -> impl Future<Output = ()> + Send;

    /// Called when the connection is closing.
    fn on_close(&self, ctx: &WsContext) -> impl Future<Output = ()> + Send {
        async move {
            let _ = ctx;
        }
    }
}
