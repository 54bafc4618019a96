//! Buzzer round manager.
//!
//! First buzz wins. The arbitration is a single conditional update on the
//! round row ("set winner and end_time only while both are unset"), so the
//! store decides the race: exactly one concurrent buzz commits, everyone
//! else observes the guard already false. No lock, no retry loop.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use db::models::buzzer_round;

use crate::error::ServiceError;
use crate::lifecycle;

pub use db::models::buzzer_round::Model as BuzzerRound;

/// Result of buzz arbitration. `Won` means this call's write closed the
/// round; `TooLate` means someone else already had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzOutcome {
    Won,
    TooLate,
}

pub struct BuzzerManager;

impl BuzzerManager {
    /// Starts a new round for a course, closing any round still open for
    /// that course first.
    pub async fn start(
        db: &DatabaseConnection,
        course_id: i64,
    ) -> Result<BuzzerRound, ServiceError> {
        let now = Utc::now();
        let closed = lifecycle::close_open::<buzzer_round::Entity, _>(
            db,
            buzzer_round::Column::CourseId,
            course_id,
            buzzer_round::Column::EndTime,
            now,
        )
        .await?;
        if closed > 1 {
            tracing::warn!(course_id, closed, "healed multiple open buzzer rounds");
        }

        let round = buzzer_round::ActiveModel {
            course_id: Set(course_id),
            start_time: Set(now),
            end_time: Set(None),
            winner_student_id: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(course_id, round_id = round.id, "buzzer round started");
        Ok(round)
    }

    /// Buzz arbitration: claims the round for `student_id` if it is still
    /// open. Winner and `end_time` land in the same write; a round's winner
    /// never changes once set.
    pub async fn buzz(
        db: &DatabaseConnection,
        round_id: i64,
        student_id: i64,
    ) -> Result<BuzzOutcome, ServiceError> {
        Self::get(db, round_id).await?;

        let won = lifecycle::claim_if_open::<buzzer_round::Entity, _>(
            db,
            buzzer_round::Column::Id,
            round_id,
            Condition::all()
                .add(buzzer_round::Column::WinnerStudentId.is_null())
                .add(buzzer_round::Column::EndTime.is_null()),
            vec![
                (
                    buzzer_round::Column::WinnerStudentId,
                    Expr::value(student_id),
                ),
                (buzzer_round::Column::EndTime, Expr::value(Utc::now())),
            ],
        )
        .await?;

        if won {
            tracing::info!(round_id, student_id, "buzz won");
            Ok(BuzzOutcome::Won)
        } else {
            tracing::debug!(round_id, student_id, "buzz too late");
            Ok(BuzzOutcome::TooLate)
        }
    }

    /// Closes a round with no winner. A no-op on an already-closed round;
    /// never touches a recorded winner.
    pub async fn stop(
        db: &DatabaseConnection,
        round_id: i64,
    ) -> Result<BuzzerRound, ServiceError> {
        let round = Self::get(db, round_id).await?;
        if round.end_time.is_none() {
            lifecycle::claim_if_open::<buzzer_round::Entity, _>(
                db,
                buzzer_round::Column::Id,
                round_id,
                Condition::all().add(buzzer_round::Column::EndTime.is_null()),
                vec![(buzzer_round::Column::EndTime, Expr::value(Utc::now()))],
            )
            .await?;
            tracing::info!(round_id, "buzzer round stopped");
        }
        Self::get(db, round_id).await
    }

    /// The most recently started round for a course, open or not.
    pub async fn latest_round(
        db: &DatabaseConnection,
        course_id: i64,
    ) -> Result<Option<BuzzerRound>, ServiceError> {
        let round = buzzer_round::Entity::find()
            .filter(buzzer_round::Column::CourseId.eq(course_id))
            .order_by_desc(buzzer_round::Column::StartTime)
            .one(db)
            .await?;
        Ok(round)
    }

    async fn get(db: &DatabaseConnection, round_id: i64) -> Result<BuzzerRound, ServiceError> {
        buzzer_round::Entity::find_by_id(round_id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("buzzer round", round_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::models::{course, user};
    use db::test_utils::setup_test_db;
    use futures::future::join_all;

    async fn seed(db: &DatabaseConnection, students: usize) -> (course::Model, Vec<user::Model>) {
        let teacher = user::Model::create(db, "teach", "Teacher").await.unwrap();
        let course = course::Model::create(db, teacher.id, "Chemistry").await.unwrap();
        let mut out = Vec::new();
        for i in 0..students {
            let username = format!("stu{i}");
            out.push(
                user::Model::create(db, &username, &format!("Student {i}"))
                    .await
                    .unwrap(),
            );
        }
        (course, out)
    }

    #[tokio::test]
    async fn start_closes_previous_round() {
        let db = setup_test_db().await;
        let (course, _) = seed(&db, 0).await;

        let r1 = BuzzerManager::start(&db, course.id).await.unwrap();
        let r2 = BuzzerManager::start(&db, course.id).await.unwrap();

        let r1_after = buzzer_round::Entity::find_by_id(r1.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert!(r1_after.end_time.is_some());
        assert!(r1_after.winner_student_id.is_none());

        let latest = BuzzerManager::latest_round(&db, course.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, r2.id);
        assert!(latest.is_open());
    }

    #[tokio::test]
    async fn first_buzz_wins_second_is_too_late() {
        let db = setup_test_db().await;
        let (course, students) = seed(&db, 2).await;
        let round = BuzzerManager::start(&db, course.id).await.unwrap();

        let first = BuzzerManager::buzz(&db, round.id, students[0].id)
            .await
            .unwrap();
        assert_eq!(first, BuzzOutcome::Won);

        let second = BuzzerManager::buzz(&db, round.id, students[1].id)
            .await
            .unwrap();
        assert_eq!(second, BuzzOutcome::TooLate);

        let closed = BuzzerManager::latest_round(&db, course.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.winner_student_id, Some(students[0].id));
        assert!(closed.end_time.is_some());
    }

    #[tokio::test]
    async fn concurrent_buzzes_produce_exactly_one_winner() {
        let db = setup_test_db().await;
        let (course, students) = seed(&db, 3).await;
        let round = BuzzerManager::start(&db, course.id).await.unwrap();

        let buzzes = students.iter().map(|s| {
            let db = db.clone();
            let student_id = s.id;
            let round_id = round.id;
            tokio::spawn(async move { BuzzerManager::buzz(&db, round_id, student_id).await })
        });
        let outcomes: Vec<BuzzOutcome> = join_all(buzzes)
            .await
            .into_iter()
            .map(|r| r.unwrap().unwrap())
            .collect();

        let wins = outcomes.iter().filter(|o| **o == BuzzOutcome::Won).count();
        assert_eq!(wins, 1);
        assert_eq!(outcomes.len(), 3);

        let row = BuzzerManager::latest_round(&db, course.id)
            .await
            .unwrap()
            .unwrap();
        assert!(row.winner_student_id.is_some());
        assert!(row.end_time.is_some());
    }

    #[tokio::test]
    async fn stop_does_not_clear_a_recorded_winner() {
        let db = setup_test_db().await;
        let (course, students) = seed(&db, 1).await;
        let round = BuzzerManager::start(&db, course.id).await.unwrap();

        BuzzerManager::buzz(&db, round.id, students[0].id)
            .await
            .unwrap();
        let stopped = BuzzerManager::stop(&db, round.id).await.unwrap();
        assert_eq!(stopped.winner_student_id, Some(students[0].id));
    }

    #[tokio::test]
    async fn buzz_on_stopped_round_is_too_late() {
        let db = setup_test_db().await;
        let (course, students) = seed(&db, 1).await;
        let round = BuzzerManager::start(&db, course.id).await.unwrap();

        BuzzerManager::stop(&db, round.id).await.unwrap();
        let outcome = BuzzerManager::buzz(&db, round.id, students[0].id)
            .await
            .unwrap();
        assert_eq!(outcome, BuzzOutcome::TooLate);

        let row = BuzzerManager::latest_round(&db, course.id)
            .await
            .unwrap()
            .unwrap();
        assert!(row.winner_student_id.is_none());
    }

    #[tokio::test]
    async fn missing_round_is_not_found() {
        let db = setup_test_db().await;
        let err = BuzzerManager::buzz(&db, 404, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }
}
