use serde::{Deserialize, Serialize};
use services::rollcall::{RollcallRecord, RollcallSession};
use validator::Validate;

use db::models::rollcall_record::AttendanceStatus;
use db::models::rollcall_session::RollcallKind;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRollcallReq {
    #[serde(default = "default_kind")]
    pub kind: RollcallKind,
    #[validate(range(min = 1, message = "duration_minutes must be positive"))]
    pub duration_minutes: i32,
    pub target_lat: Option<f64>,
    pub target_lng: Option<f64>,
}

fn default_kind() -> RollcallKind {
    RollcallKind::Immediate
}

#[derive(Debug, Deserialize)]
pub struct CheckInReq {
    pub student_id: i64,
    pub gps_lat: Option<f64>,
    pub gps_lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusReq {
    pub status: AttendanceStatus,
}

/// Wire form of a roll-call session. `active` mirrors `end_time IS NULL`.
#[derive(Debug, Clone, Serialize, Default)]
pub struct RollcallSessionResponse {
    pub id: i64,
    pub course_id: i64,
    pub kind: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub duration_minutes: i32,
    pub target_lat: Option<f64>,
    pub target_lng: Option<f64>,
    pub active: bool,
}

impl From<RollcallSession> for RollcallSessionResponse {
    fn from(s: RollcallSession) -> Self {
        Self {
            id: s.id,
            course_id: s.course_id,
            kind: s.kind.to_string(),
            start_time: s.start_time.to_rfc3339(),
            end_time: s.end_time.map(|t| t.to_rfc3339()),
            duration_minutes: s.duration_minutes,
            target_lat: s.target_lat,
            target_lng: s.target_lng,
            active: s.end_time.is_none(),
        }
    }
}

/// Wire form of one check-in record.
#[derive(Debug, Clone, Serialize, Default)]
pub struct RollcallRecordResponse {
    pub session_id: i64,
    pub student_id: i64,
    pub status: String,
    pub recorded_at: String,
    pub gps_lat: Option<f64>,
    pub gps_lng: Option<f64>,
}

impl From<RollcallRecord> for RollcallRecordResponse {
    fn from(r: RollcallRecord) -> Self {
        Self {
            session_id: r.session_id,
            student_id: r.student_id,
            status: r.status.to_string(),
            recorded_at: r.recorded_at.to_rfc3339(),
            gps_lat: r.gps_lat,
            gps_lng: r.gps_lng,
        }
    }
}

/// Body of a successful check-in: the status arbitration assigned.
#[derive(Debug, Clone, Serialize, Default)]
pub struct CheckInResponse {
    pub session_id: i64,
    pub student_id: i64,
    pub status: String,
}
