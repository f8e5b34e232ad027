//! Tag entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a tag. Deletion is a status change, never a row removal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "lowercase")]
pub enum TagStatus {
    /// Visible to every read.
    #[sea_orm(num_value = 1)]
    #[default]
    Available,
    /// Soft-deleted.
    #[sea_orm(num_value = 10)]
    Deleted,
}

/// Question tag.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// URL-safe tag name
    #[sea_orm(unique)]
    pub slug_name: String,

    pub display_name: String,

    /// Tag description as written (markdown)
    #[sea_orm(column_type = "Text")]
    pub original_text: String,

    /// Tag description rendered to HTML
    #[sea_orm(column_type = "Text")]
    pub parsed_text: String,

    /// Canonical tag this tag is a synonym of; `None` for canonical tags
    #[sea_orm(nullable, indexed)]
    pub main_tag_id: Option<String>,

    #[sea_orm(nullable)]
    pub main_tag_slug_name: Option<String>,

    #[sea_orm(default_value = false)]
    pub recommend: bool,

    #[sea_orm(default_value = false)]
    pub reserved: bool,

    pub status: TagStatus,

    #[sea_orm(default_value = 0)]
    pub follow_count: i32,

    #[sea_orm(default_value = 0)]
    pub question_count: i32,

    /// Latest revision of the tag description
    pub revision_id: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Whether this tag points at a main tag.
    #[must_use]
    pub const fn is_synonym(&self) -> bool {
        self.main_tag_id.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
