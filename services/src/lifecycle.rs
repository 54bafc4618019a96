//! Shared session-lifecycle primitives.
//!
//! Roll-call sessions and buzzer rounds follow the same two patterns:
//!
//! * `close_open` + insert: a `start` first closes every open row in its
//!   scope, then inserts one new open row. The two writes are not a single
//!   transaction; a concurrent stale writer can leave a second row open
//!   briefly, and the next `start` heals it by closing all of them.
//! * `claim_if_open`: a single-row conditional update. Under N concurrent
//!   claims on one row, the store commits exactly one update with the open
//!   guard still true; every other caller observes zero rows affected.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

/// Closes every open row in a scope by setting its end marker to `now`.
///
/// Returns the number of rows closed. More than one indicates a healed
/// invariant violation, which the caller may log but must not treat as
/// fatal.
pub async fn close_open<E, C>(
    db: &DatabaseConnection,
    scope_col: C,
    scope_id: i64,
    end_col: C,
    now: DateTime<Utc>,
) -> Result<u64, DbErr>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    let res = E::update_many()
        .col_expr(end_col, Expr::value(now))
        .filter(scope_col.eq(scope_id))
        .filter(end_col.is_null())
        .exec(db)
        .await?;

    Ok(res.rows_affected)
}

/// Applies `claims` to the row with `id` only if `open_guard` still holds,
/// in one conditional update.
///
/// Returns `true` for the single caller whose update committed. All claim
/// fields land in the same write, so a winning claim is never observable
/// half-applied.
pub async fn claim_if_open<E, C>(
    db: &DatabaseConnection,
    id_col: C,
    id: i64,
    open_guard: Condition,
    claims: Vec<(C, SimpleExpr)>,
) -> Result<bool, DbErr>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    let mut update = E::update_many();
    for (col, expr) in claims {
        update = update.col_expr(col, expr);
    }

    let res = update
        .filter(id_col.eq(id))
        .filter(open_guard)
        .exec(db)
        .await?;

    Ok(res.rows_affected == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use db::models::{buzzer_round, course, user};
    use db::test_utils::setup_test_db;
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    async fn seed_round(db: &sea_orm::DatabaseConnection) -> buzzer_round::Model {
        let teacher = user::Model::create(db, "t1", "Teacher One").await.unwrap();
        let c = course::Model::create(db, teacher.id, "Algebra").await.unwrap();
        buzzer_round::ActiveModel {
            course_id: Set(c.id),
            start_time: Set(Utc::now()),
            end_time: Set(None),
            winner_student_id: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn close_open_closes_every_open_row_in_scope() {
        let db = setup_test_db().await;
        let r1 = seed_round(&db).await;
        // a second open round in the same course, as left by an interleaved start
        buzzer_round::ActiveModel {
            course_id: Set(r1.course_id),
            start_time: Set(Utc::now()),
            end_time: Set(None),
            winner_student_id: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let closed = close_open::<buzzer_round::Entity, _>(
            &db,
            buzzer_round::Column::CourseId,
            r1.course_id,
            buzzer_round::Column::EndTime,
            Utc::now(),
        )
        .await
        .unwrap();
        assert_eq!(closed, 2);

        let rows = buzzer_round::Entity::find().all(&db).await.unwrap();
        assert!(rows.iter().all(|r| r.end_time.is_some()));
    }

    #[tokio::test]
    async fn claim_succeeds_once_then_fails() {
        let db = setup_test_db().await;
        let round = seed_round(&db).await;
        let student = user::Model::create(&db, "s1", "Student One").await.unwrap();

        let guard = || {
            Condition::all()
                .add(buzzer_round::Column::WinnerStudentId.is_null())
                .add(buzzer_round::Column::EndTime.is_null())
        };
        let claims = |sid: i64| {
            vec![
                (
                    buzzer_round::Column::WinnerStudentId,
                    Expr::value(sid),
                ),
                (buzzer_round::Column::EndTime, Expr::value(Utc::now())),
            ]
        };

        let first = claim_if_open::<buzzer_round::Entity, _>(
            &db,
            buzzer_round::Column::Id,
            round.id,
            guard(),
            claims(student.id),
        )
        .await
        .unwrap();
        assert!(first);

        let second = claim_if_open::<buzzer_round::Entity, _>(
            &db,
            buzzer_round::Column::Id,
            round.id,
            guard(),
            claims(student.id + 1),
        )
        .await
        .unwrap();
        assert!(!second);

        let row = buzzer_round::Entity::find_by_id(round.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.winner_student_id, Some(student.id));
        assert!(row.end_time.is_some());
    }
}
