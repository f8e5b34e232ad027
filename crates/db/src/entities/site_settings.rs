//! Site settings entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Singleton ID for the site settings row.
pub const SITE_SETTINGS_ID: &str = "site";

/// Site-wide write settings.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Questions must carry at least one tag
    #[sea_orm(default_value = false)]
    pub required_tag: bool,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
