//! Like entity - the single engagement ledger spanning all content kinds.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::content::ContentKind;

/// A like by one user on one content item.
///
/// `(user_id, target_id, target_kind)` is unique: a user likes a given item
/// at most once. `target_id`/`target_kind` form a discriminator reference
/// rather than a foreign key, so the storage layer cannot cascade across the
/// kind boundary; content deletion purges matching rows explicitly.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "like")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// User who liked the item.
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Target content item ID.
    #[sea_orm(indexed)]
    pub target_id: String,

    /// Which content table `target_id` points into.
    pub target_kind: ContentKind,

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
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
