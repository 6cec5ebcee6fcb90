//! Art comment entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "art_comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Comment author.
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Art piece being commented on.
    #[sea_orm(indexed)]
    pub art_id: String,

    /// Comment body.
    #[sea_orm(column_type = "Text")]
    pub text: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::art::Entity",
        from = "Column::ArtId",
        to = "super::art::Column::Id",
        on_delete = "Cascade"
    )]
    Art,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::art::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Art.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
