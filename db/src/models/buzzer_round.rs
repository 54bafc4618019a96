use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// One buzzer round for a course.
///
/// State machine: OPEN (no winner) -> CLOSED. A round closes either by the
/// first successful buzz (winner and end_time set in one atomic write) or
/// by an explicit stop / a newer round superseding it (end_time only).
/// CLOSED is terminal.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "buzzer_rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub start_time: DateTime<Utc>,
    /// NULL while the round is open.
    pub end_time: Option<DateTime<Utc>>,
    pub winner_student_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::WinnerStudentId",
        to = "super::user::Column::Id"
    )]
    Winner,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.end_time.is_none() && self.winner_student_id.is_none()
    }
}
