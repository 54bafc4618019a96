use serde::Serialize;
use util::ws::WebSocketManager;

use super::payload;
use super::topics;
use crate::ws::core::{envelope, event::Event};

#[derive(Debug, Serialize)]
pub struct LatestRoundChangedEvent {
    #[serde(flatten)]
    pub payload: payload::LatestRoundChanged,
}
impl Event for LatestRoundChangedEvent {
    const NAME: &'static str = "buzzer.latest_round";
    fn topic_path(&self) -> String {
        topics::buzzer_course_topic(self.payload.course_id)
    }
}

pub async fn latest_round_changed(ws: &WebSocketManager, p: payload::LatestRoundChanged) {
    envelope::emit(ws, &LatestRoundChangedEvent { payload: p }).await;
}
