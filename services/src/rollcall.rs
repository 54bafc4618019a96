//! Roll-call session manager.
//!
//! Owns the lifecycle of roll-call sessions per course: start (closing any
//! session left open), explicit stop, check-in arbitration, and the teacher
//! status override. "Active" is defined purely by `end_time IS NULL`;
//! duration expiry is advisory and never auto-closes a session.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use sea_orm::sea_query::Expr;

use db::models::rollcall_record::{self, AttendanceStatus};
use db::models::rollcall_session::{self, RollcallKind};

use crate::error::ServiceError;
use crate::lifecycle;

pub use db::models::rollcall_record::Model as RollcallRecord;
pub use db::models::rollcall_session::Model as RollcallSession;

/// Result of check-in arbitration. Only `Accepted` wrote anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInOutcome {
    Accepted(AttendanceStatus),
    AlreadyCheckedIn,
    SessionClosed,
}

/// Attendance totals for one student across all sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StudentStats {
    pub total_rollcalls: u64,
    pub attended_count: u64,
}

pub struct RollcallManager;

impl RollcallManager {
    /// Starts a new roll-call session for a course, closing every session
    /// still open for that course first.
    pub async fn start(
        db: &DatabaseConnection,
        course_id: i64,
        kind: RollcallKind,
        duration_minutes: i32,
        target: Option<(f64, f64)>,
    ) -> Result<RollcallSession, ServiceError> {
        if duration_minutes <= 0 {
            return Err(ServiceError::validation(
                "duration_minutes must be positive",
            ));
        }

        let now = Utc::now();
        let closed = lifecycle::close_open::<rollcall_session::Entity, _>(
            db,
            rollcall_session::Column::CourseId,
            course_id,
            rollcall_session::Column::EndTime,
            now,
        )
        .await?;
        if closed > 1 {
            tracing::warn!(course_id, closed, "healed multiple open roll-call sessions");
        }

        let session = rollcall_session::ActiveModel {
            course_id: Set(course_id),
            kind: Set(kind),
            start_time: Set(now),
            end_time: Set(None),
            duration_minutes: Set(duration_minutes),
            target_lat: Set(target.map(|(lat, _)| lat)),
            target_lng: Set(target.map(|(_, lng)| lng)),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(course_id, session_id = session.id, "roll-call session started");
        Ok(session)
    }

    /// Stops a session if it is still open. Stopping a closed session is a
    /// no-op; the original `end_time` stands.
    pub async fn stop(
        db: &DatabaseConnection,
        session_id: i64,
    ) -> Result<RollcallSession, ServiceError> {
        let session = Self::get(db, session_id).await?;
        if session.is_open() {
            lifecycle::claim_if_open::<rollcall_session::Entity, _>(
                db,
                rollcall_session::Column::Id,
                session_id,
                Condition::all().add(rollcall_session::Column::EndTime.is_null()),
                vec![(rollcall_session::Column::EndTime, Expr::value(Utc::now()))],
            )
            .await?;
            tracing::info!(session_id, "roll-call session stopped");
        }
        Self::get(db, session_id).await
    }

    /// Check-in arbitration for one (session, student) pair.
    ///
    /// At most one record ever exists per pair: a prior record short-circuits
    /// to `AlreadyCheckedIn`, and a concurrent duplicate insert trips the
    /// composite primary key and maps to the same outcome. Coordinates are
    /// stored verbatim; no geofence is checked against the session target.
    pub async fn check_in(
        db: &DatabaseConnection,
        session_id: i64,
        student_id: i64,
        coords: Option<(f64, f64)>,
    ) -> Result<CheckInOutcome, ServiceError> {
        let session = Self::get(db, session_id).await?;
        if !session.is_open() {
            return Ok(CheckInOutcome::SessionClosed);
        }

        let existing = rollcall_record::Entity::find_by_id((session_id, student_id))
            .one(db)
            .await?;
        if existing.is_some() {
            return Ok(CheckInOutcome::AlreadyCheckedIn);
        }

        let now = Utc::now();
        let status = session.status_at(now);
        let insert = rollcall_record::ActiveModel {
            session_id: Set(session_id),
            student_id: Set(student_id),
            status: Set(status),
            recorded_at: Set(now),
            gps_lat: Set(coords.map(|(lat, _)| lat)),
            gps_lng: Set(coords.map(|(_, lng)| lng)),
        }
        .insert(db)
        .await;

        match insert {
            Ok(_) => {
                tracing::debug!(session_id, student_id, %status, "check-in accepted");
                Ok(CheckInOutcome::Accepted(status))
            }
            // lost the race to our own duplicate: the pair is already recorded
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(CheckInOutcome::AlreadyCheckedIn)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Teacher override: upserts the record for (session, student) with the
    /// given status and the current time, bypassing arbitration and the
    /// elapsed-time computation.
    pub async fn set_status(
        db: &DatabaseConnection,
        session_id: i64,
        student_id: i64,
        status: AttendanceStatus,
    ) -> Result<RollcallRecord, ServiceError> {
        // ensure the session reference is valid before upserting
        Self::get(db, session_id).await?;

        let now = Utc::now();
        let existing = rollcall_record::Entity::find_by_id((session_id, student_id))
            .one(db)
            .await?;

        let record = match existing {
            Some(record) => Self::overwrite(db, record, status, now).await?,
            None => {
                let insert = rollcall_record::ActiveModel {
                    session_id: Set(session_id),
                    student_id: Set(student_id),
                    status: Set(status),
                    recorded_at: Set(now),
                    gps_lat: Set(None),
                    gps_lng: Set(None),
                }
                .insert(db)
                .await;

                match insert {
                    Ok(record) => record,
                    // a concurrent check-in inserted the pair first; the
                    // override still wins by overwriting that record
                    Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                        let record = rollcall_record::Entity::find_by_id((session_id, student_id))
                            .one(db)
                            .await?
                            .ok_or(ServiceError::not_found("roll-call record", session_id))?;
                        Self::overwrite(db, record, status, now).await?
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        };

        tracing::info!(session_id, student_id, %status, "attendance status overridden");
        Ok(record)
    }

    /// The single open session for a course, or `None`.
    ///
    /// If an interleaving left more than one row open, the newest wins here
    /// and the next `start` closes all of them.
    pub async fn active_session(
        db: &DatabaseConnection,
        course_id: i64,
    ) -> Result<Option<RollcallSession>, ServiceError> {
        let session = rollcall_session::Entity::find()
            .filter(rollcall_session::Column::CourseId.eq(course_id))
            .filter(rollcall_session::Column::EndTime.is_null())
            .order_by_desc(rollcall_session::Column::StartTime)
            .one(db)
            .await?;
        Ok(session)
    }

    /// All check-in records for a session; the records feed re-emits this
    /// full set on every change.
    pub async fn records(
        db: &DatabaseConnection,
        session_id: i64,
    ) -> Result<Vec<RollcallRecord>, ServiceError> {
        let records = rollcall_record::Entity::find()
            .filter(rollcall_record::Column::SessionId.eq(session_id))
            .order_by_asc(rollcall_record::Column::RecordedAt)
            .all(db)
            .await?;
        Ok(records)
    }

    /// All sessions of a course, most recent first.
    pub async fn session_history(
        db: &DatabaseConnection,
        course_id: i64,
    ) -> Result<Vec<RollcallSession>, ServiceError> {
        let sessions = rollcall_session::Entity::find()
            .filter(rollcall_session::Column::CourseId.eq(course_id))
            .order_by_desc(rollcall_session::Column::StartTime)
            .all(db)
            .await?;
        Ok(sessions)
    }

    /// Totals of recorded roll-calls for one student; every status except
    /// absent counts as attended.
    pub async fn student_stats(
        db: &DatabaseConnection,
        student_id: i64,
    ) -> Result<StudentStats, ServiceError> {
        let records = rollcall_record::Entity::find()
            .filter(rollcall_record::Column::StudentId.eq(student_id))
            .all(db)
            .await?;

        let attended = records
            .iter()
            .filter(|r| r.status != AttendanceStatus::Absent)
            .count() as u64;

        Ok(StudentStats {
            total_rollcalls: records.len() as u64,
            attended_count: attended,
        })
    }

    async fn overwrite(
        db: &DatabaseConnection,
        record: RollcallRecord,
        status: AttendanceStatus,
        now: chrono::DateTime<Utc>,
    ) -> Result<RollcallRecord, ServiceError> {
        let mut active = record.into_active_model();
        active.status = Set(status);
        active.recorded_at = Set(now);
        Ok(active.update(db).await?)
    }

    async fn get(
        db: &DatabaseConnection,
        session_id: i64,
    ) -> Result<RollcallSession, ServiceError> {
        rollcall_session::Entity::find_by_id(session_id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("roll-call session", session_id))
    }
}
