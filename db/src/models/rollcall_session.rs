use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::rollcall_record::AttendanceStatus;

/// One invocation of "start roll-call" for a course.
///
/// A session is open while `end_time` is NULL. Duration expiry is advisory:
/// the row stays open until an explicit stop or until a newer `start`
/// supersedes it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "rollcall_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub kind: RollcallKind,
    pub start_time: DateTime<Utc>,
    /// NULL while the session is open.
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: i32,
    pub target_lat: Option<f64>,
    pub target_lng: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// How the roll-call was taken. GPS sessions carry target coordinates but
/// no geofence is enforced; student coordinates are stored verbatim.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "rollcall_kind")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RollcallKind {
    #[sea_orm(string_value = "immediate")]
    Immediate,
    #[sea_orm(string_value = "gps")]
    Gps,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::rollcall_record::Entity")]
    Records,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl Related<super::rollcall_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Attendance status a check-in at `now` would earn.
    ///
    /// Late only when strictly past the duration; arriving exactly on the
    /// boundary still counts as present.
    pub fn status_at(&self, now: DateTime<Utc>) -> AttendanceStatus {
        let elapsed_secs = (now - self.start_time).num_seconds();
        if elapsed_secs > i64::from(self.duration_minutes) * 60 {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn session(duration_minutes: i32) -> Model {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        Model {
            id: 1,
            course_id: 1,
            kind: RollcallKind::Immediate,
            start_time: start,
            end_time: None,
            duration_minutes,
            target_lat: None,
            target_lng: None,
            created_at: start,
        }
    }

    #[test]
    fn present_within_window() {
        let s = session(5);
        assert_eq!(
            s.status_at(s.start_time + Duration::minutes(1)),
            AttendanceStatus::Present
        );
    }

    #[test]
    fn present_exactly_on_boundary() {
        let s = session(5);
        assert_eq!(
            s.status_at(s.start_time + Duration::minutes(5)),
            AttendanceStatus::Present
        );
    }

    #[test]
    fn late_one_second_past_boundary() {
        let s = session(5);
        assert_eq!(
            s.status_at(s.start_time + Duration::minutes(5) + Duration::seconds(1)),
            AttendanceStatus::Late
        );
    }
}
