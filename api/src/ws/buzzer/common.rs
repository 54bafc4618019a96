use serde::Deserialize;

/// Messages a buzzer feed client may send. Buzzing itself goes through
/// HTTP so arbitration stays in one place; the feed is push-only.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuzzerIncoming {
    Ping,
}
