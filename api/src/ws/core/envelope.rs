use crate::ws::core::event::Event;
use util::ws::{emit as emit_enveloped, WebSocketManager};

pub async fn emit<E>(ws: &WebSocketManager, ev: &E)
where
    E: Event,
{
    let topic = ev.topic_path();
    emit_enveloped(ws, &topic, E::NAME, ev).await;
}
