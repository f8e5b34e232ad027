//! Collaborator contracts consumed by the services.
//!
//! Objects, users and comments live in other subsystems; the services only
//! see them through these traits. Revisions and site settings have
//! database-backed implementations in `qanda-db`.

use async_trait::async_trait;
use qanda_common::{AppResult, ObjectType};
use qanda_db::{
    entities::revision,
    repositories::{RevisionRepository, SiteSettingsRepository},
};
use serde::{Deserialize, Serialize};

/// Summary of a question, answer, tag or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Title; for answers and comments the title of the owning question.
    pub title: String,
    /// Kind of object.
    pub object_type: ObjectType,
    /// Owning question, if any.
    pub question_id: Option<String>,
    /// Owning answer, if any.
    pub answer_id: Option<String>,
}

/// Public profile fields of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBasicInfo {
    /// User ID.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Name shown on the site.
    pub display_name: String,
}

/// A comment as shown on a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentInfo {
    /// Comment ID.
    pub id: String,
    /// Comment body rendered to HTML.
    pub parsed_text: String,
}

/// Resolves any object ID to its summary.
#[async_trait]
pub trait ObjectInfoResolver: Send + Sync {
    /// Look up an object. Fails when the object cannot be resolved.
    async fn get_info(&self, object_id: &str) -> AppResult<ObjectInfo>;
}

/// Resolves users to their public profile.
#[async_trait]
pub trait UserProfileResolver: Send + Sync {
    /// Look up a user; `Ok(None)` when the user does not exist.
    async fn get_user_basic_info(&self, user_id: &str) -> AppResult<Option<UserBasicInfo>>;
}

/// Resolves comments to their rendered text.
#[async_trait]
pub trait CommentResolver: Send + Sync {
    /// Look up a comment.
    async fn get_comment(&self, comment_id: &str) -> AppResult<CommentInfo>;
}

/// Source of stored revisions.
#[async_trait]
pub trait RevisionStore: Send + Sync {
    /// Load a revision; a missing revision is an error.
    async fn get_revision(&self, revision_id: &str) -> AppResult<revision::Model>;
}

/// Reader for site-wide configuration.
#[async_trait]
pub trait SiteConfigReader: Send + Sync {
    /// Whether questions must carry tags.
    async fn tag_required(&self) -> AppResult<bool>;
}

#[async_trait]
impl RevisionStore for RevisionRepository {
    async fn get_revision(&self, revision_id: &str) -> AppResult<revision::Model> {
        Self::get_revision(self, revision_id).await
    }
}

#[async_trait]
impl SiteConfigReader for SiteSettingsRepository {
    async fn tag_required(&self) -> AppResult<bool> {
        Ok(self
            .find()
            .await?
            .is_some_and(|settings| settings.required_tag))
    }
}

/// Site configuration fixed at construction, for tools and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSiteConfig {
    /// Value reported by [`SiteConfigReader::tag_required`].
    pub tag_required: bool,
}

#[async_trait]
impl SiteConfigReader for StaticSiteConfig {
    async fn tag_required(&self) -> AppResult<bool> {
        Ok(self.tag_required)
    }
}
