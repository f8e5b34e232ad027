//! Revision entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Snapshot of a question, answer or tag at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "revision")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Author of the revision
    pub user_id: String,

    /// Object this revision snapshots
    #[sea_orm(indexed)]
    pub object_id: String,

    pub title: String,

    /// JSON-encoded object content; its shape depends on the object type
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Edit summary
    #[sea_orm(nullable)]
    pub log: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::activity::Entity")]
    Activity,
}

impl Related<super::activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
