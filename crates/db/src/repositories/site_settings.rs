//! Site settings repository.

use std::sync::Arc;

use crate::entities::{SiteSettings, site_settings, site_settings::SITE_SETTINGS_ID};
use chrono::Utc;
use qanda_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

/// Repository for site-wide settings.
#[derive(Clone)]
pub struct SiteSettingsRepository {
    db: Arc<DatabaseConnection>,
}

impl SiteSettingsRepository {
    /// Create a new site settings repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the site settings row.
    pub async fn find(&self) -> AppResult<Option<site_settings::Model>> {
        SiteSettings::find_by_id(SITE_SETTINGS_ID)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("get site settings", e))
    }

    /// Get the site settings, creating them with `required_tag` if missing.
    pub async fn get_or_create(&self, required_tag: bool) -> AppResult<site_settings::Model> {
        if let Some(settings) = self.find().await? {
            return Ok(settings);
        }

        let model = site_settings::ActiveModel {
            id: Set(SITE_SETTINGS_ID.to_string()),
            required_tag: Set(required_tag),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("insert site settings", e))
    }

    /// Change whether questions must carry tags.
    pub async fn set_required_tag(&self, required_tag: bool) -> AppResult<site_settings::Model> {
        let settings = self.get_or_create(required_tag).await?;

        let mut active: site_settings::ActiveModel = settings.into();
        active.required_tag = Set(required_tag);
        active.updated_at = Set(Some(Utc::now().into()));

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("update site settings", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDatabase;

    #[tokio::test]
    async fn test_get_or_create_then_update() {
        let repo = SiteSettingsRepository::new(TestDatabase::sqlite().await.unwrap().into_shared());
        assert!(repo.find().await.unwrap().is_none());

        let created = repo.get_or_create(false).await.unwrap();
        assert!(!created.required_tag);

        // Existing row wins over the seed value
        let existing = repo.get_or_create(true).await.unwrap();
        assert!(!existing.required_tag);

        let updated = repo.set_required_tag(true).await.unwrap();
        assert!(updated.required_tag);
        assert!(updated.updated_at.is_some());
        assert!(repo.find().await.unwrap().unwrap().required_tag);
    }
}
