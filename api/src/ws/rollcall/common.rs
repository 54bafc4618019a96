use serde::Deserialize;

/// Messages a roll-call feed client may send. The feeds are push-only;
/// the only client message is an application-level ping.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RollcallIncoming {
    Ping,
}
