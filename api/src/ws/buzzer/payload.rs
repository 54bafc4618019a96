use serde::Serialize;

use crate::routes::buzzer::common::BuzzerRoundResponse;

/// Emitted on the course topic after every round start, winning buzz, or
/// stop. Clients render the round's open/winner state directly.
#[derive(Debug, Clone, Serialize)]
pub struct LatestRoundChanged {
    pub course_id: i64,
    pub round: Option<BuzzerRoundResponse>,
}
