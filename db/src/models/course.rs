use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

/// A course owned by a teacher. Roll-call sessions and buzzer rounds are
/// scoped to one course.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::rollcall_session::Entity")]
    RollcallSessions,
    #[sea_orm(has_many = "super::buzzer_round::Entity")]
    BuzzerRounds,
}

impl Related<super::rollcall_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RollcallSessions.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl Related<super::buzzer_round::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BuzzerRounds.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        teacher_id: i64,
        name: &str,
    ) -> Result<Self, DbErr> {
        ActiveModel {
            teacher_id: Set(teacher_id),
            name: Set(name.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
