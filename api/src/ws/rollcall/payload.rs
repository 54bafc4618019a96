use serde::Serialize;

use crate::routes::rollcall::common::{RollcallRecordResponse, RollcallSessionResponse};

/// Emitted on the course topic whenever the active session changes;
/// `session` is `None` after a stop leaves the course without one.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveSessionChanged {
    pub course_id: i64,
    pub session: Option<RollcallSessionResponse>,
}

/// Emitted on the session topic after every accepted check-in or status
/// override, carrying the full record set.
#[derive(Debug, Clone, Serialize)]
pub struct RecordsChanged {
    pub session_id: i64,
    pub records: Vec<RollcallRecordResponse>,
}
