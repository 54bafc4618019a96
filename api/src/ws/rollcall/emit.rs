use serde::Serialize;
use util::ws::WebSocketManager;

use super::payload;
use super::topics;
use crate::ws::core::{envelope, event::Event};

#[derive(Debug, Serialize)]
pub struct ActiveSessionChangedEvent {
    #[serde(flatten)]
    pub payload: payload::ActiveSessionChanged,
}
impl Event for ActiveSessionChangedEvent {
    const NAME: &'static str = "rollcall.active_session";
    fn topic_path(&self) -> String {
        topics::rollcall_course_topic(self.payload.course_id)
    }
}

#[derive(Debug, Serialize)]
pub struct RecordsChangedEvent {
    #[serde(flatten)]
    pub payload: payload::RecordsChanged,
}
impl Event for RecordsChangedEvent {
    const NAME: &'static str = "rollcall.records";
    fn topic_path(&self) -> String {
        topics::rollcall_session_topic(self.payload.session_id)
    }
}

/* ---------- one-liner helpers ---------- */

pub async fn active_session_changed(ws: &WebSocketManager, p: payload::ActiveSessionChanged) {
    envelope::emit(ws, &ActiveSessionChangedEvent { payload: p }).await;
}

pub async fn records_changed(ws: &WebSocketManager, p: payload::RecordsChanged) {
    envelope::emit(ws, &RecordsChangedEvent { payload: p }).await;
}
