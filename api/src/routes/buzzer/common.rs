use serde::{Deserialize, Serialize};
use services::buzzer::BuzzerRound;

#[derive(Debug, Deserialize)]
pub struct BuzzReq {
    pub student_id: i64,
}

/// Wire form of a buzzer round. `open` means no winner and no end time.
#[derive(Debug, Clone, Serialize, Default)]
pub struct BuzzerRoundResponse {
    pub id: i64,
    pub course_id: i64,
    pub start_time: String,
    pub end_time: Option<String>,
    pub winner_student_id: Option<i64>,
    pub open: bool,
}

impl From<BuzzerRound> for BuzzerRoundResponse {
    fn from(r: BuzzerRound) -> Self {
        let open = r.is_open();
        Self {
            id: r.id,
            course_id: r.course_id,
            start_time: r.start_time.to_rfc3339(),
            end_time: r.end_time.map(|t| t.to_rfc3339()),
            winner_student_id: r.winner_student_id,
            open,
        }
    }
}
