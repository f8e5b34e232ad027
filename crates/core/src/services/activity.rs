//! Activity timeline service.
//!
//! Renders the history of a question, answer or tag: every recorded activity
//! joined with the acting user, comment text where relevant, and revision
//! snapshots for diffing. Only failures to load the object or revision
//! itself abort a request; enrichment failures are logged and leave the
//! affected fields empty.

use std::sync::Arc;

use qanda_common::{AppError, AppResult, ObjectType};
use qanda_db::{entities::activity, repositories::ActivityRepository};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use validator::Validate;

use super::{
    resolvers::{CommentResolver, ObjectInfo, ObjectInfoResolver, RevisionStore, UserProfileResolver},
    revision_content::{RevisionContent, RevisionDecodeError},
};

/// Input for fetching an object's timeline.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GetObjectTimelineInput {
    /// Question, answer or tag whose timeline to render.
    #[validate(length(min = 1))]
    pub object_id: String,
    /// Include voter-side vote activities.
    #[serde(default)]
    pub show_vote: bool,
}

/// Input for fetching two revisions side by side.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GetObjectTimelineDetailInput {
    /// Revision shown on the left of the diff.
    #[validate(length(min = 1))]
    pub old_revision_id: String,
    /// Revision shown on the right of the diff.
    #[validate(length(min = 1))]
    pub new_revision_id: String,
}

/// One rendered timeline entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityTimelineItem {
    /// Activity ID.
    pub activity_id: String,
    /// Revision produced by the activity, if any.
    pub revision_id: Option<String>,
    /// Unix seconds.
    pub created_at: i64,
    /// Whether the activity was undone.
    pub cancelled: bool,
    /// Unix seconds; only set for cancelled activities.
    pub cancelled_at: Option<i64>,
    /// Object acted on, e.g. a comment on the question.
    pub object_id: String,
    /// Empty for activity codes this build does not know.
    pub object_type: String,
    /// Display label, e.g. `upvote` or `edited`.
    pub activity_type: String,
    /// Acting user's login name; empty when the user is unknown.
    pub username: String,
    /// Acting user's display name; empty when the user is unknown.
    pub user_display_name: String,
    /// Rendered comment text for comment activities.
    pub comment: String,
}

/// An object's summary and its timeline.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectTimeline {
    /// Summary of the object.
    pub object_info: ObjectInfo,
    /// Entries, oldest first.
    pub timeline: Vec<ActivityTimelineItem>,
}

/// A revision rendered for diff display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectTimelineDetail {
    /// Title; the question title for answers, the slug name for tags.
    pub title: String,
    /// Tag slug names; only questions carry tags.
    pub tags: Vec<String>,
    /// Markdown source.
    pub original_text: String,
}

/// Two revisions of the same object.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectTimelineDiff {
    /// Older revision.
    pub old_revision: ObjectTimelineDetail,
    /// Newer revision.
    pub new_revision: ObjectTimelineDetail,
}

/// Activity timeline service.
#[derive(Clone)]
pub struct ActivityService {
    activity_repo: ActivityRepository,
    object_info: Arc<dyn ObjectInfoResolver>,
    users: Arc<dyn UserProfileResolver>,
    comments: Arc<dyn CommentResolver>,
    revisions: Arc<dyn RevisionStore>,
}

impl ActivityService {
    /// Create a new activity service.
    #[must_use]
    pub fn new(
        activity_repo: ActivityRepository,
        object_info: Arc<dyn ObjectInfoResolver>,
        users: Arc<dyn UserProfileResolver>,
        comments: Arc<dyn CommentResolver>,
        revisions: Arc<dyn RevisionStore>,
    ) -> Self {
        Self {
            activity_repo,
            object_info,
            users,
            comments,
            revisions,
        }
    }

    /// Get the timeline of a question, answer or tag.
    pub async fn get_object_timeline(
        &self,
        input: GetObjectTimelineInput,
    ) -> AppResult<ObjectTimeline> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let object_info = self.object_info.get_info(&input.object_id).await?;

        let activities = self
            .activity_repo
            .get_object_all_activity(&input.object_id, input.show_vote)
            .await?;

        let mut timeline = Vec::with_capacity(activities.len());
        for act in activities {
            if let Some(item) = self.render_item(act).await {
                timeline.push(item);
            }
        }

        Ok(ObjectTimeline {
            object_info,
            timeline,
        })
    }

    /// Get two revisions rendered for diff display.
    pub async fn get_object_timeline_detail(
        &self,
        input: GetObjectTimelineDetailInput,
    ) -> AppResult<ObjectTimelineDiff> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let old_revision = self.get_one_object_detail(&input.old_revision_id).await?;
        let new_revision = self.get_one_object_detail(&input.new_revision_id).await?;

        Ok(ObjectTimelineDiff {
            old_revision,
            new_revision,
        })
    }

    /// Render one activity row; `None` when its label is hidden.
    async fn render_item(&self, act: activity::Model) -> Option<ActivityTimelineItem> {
        let mut item = ActivityTimelineItem {
            created_at: act.created_at.timestamp(),
            cancelled: act.cancelled,
            cancelled_at: act
                .cancelled_at
                .filter(|_| act.cancelled)
                .map(|at| at.timestamp()),
            ..Default::default()
        };

        match act.kind() {
            Some(kind) => {
                item.object_type = kind.object_type().to_string();
                item.activity_type = kind.display_label()?.to_string();
            }
            None => {
                debug!(
                    activity_id = %act.id,
                    code = act.activity_type,
                    "Unknown activity code"
                );
            }
        }

        match self.users.get_user_basic_info(&act.user_id).await {
            Ok(Some(user)) => {
                item.username = user.username;
                item.user_display_name = user.display_name;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, user_id = %act.user_id, "Failed to resolve activity user");
            }
        }

        if item.object_type == ObjectType::Comment.as_str() {
            match self.comments.get_comment(&act.object_id).await {
                Ok(comment) => item.comment = comment.parsed_text,
                Err(e) => {
                    warn!(error = %e, comment_id = %act.object_id, "Failed to resolve comment");
                }
            }
        }

        item.activity_id = act.id;
        item.revision_id = act.revision_id;
        item.object_id = act.object_id;
        Some(item)
    }

    async fn get_one_object_detail(&self, revision_id: &str) -> AppResult<ObjectTimelineDetail> {
        let revision = self.revisions.get_revision(revision_id).await?;
        let object_info = self.object_info.get_info(&revision.object_id).await?;

        match RevisionContent::decode(object_info.object_type, &revision.content) {
            Ok(content) => Ok(content.into_detail(&object_info)),
            Err(RevisionDecodeError::UnsupportedObjectType(object_type)) => {
                error!(%revision_id, %object_type, "Unknown object type for revision");
                Ok(ObjectTimelineDetail::default())
            }
            Err(e) => {
                error!(error = %e, %revision_id, "Revision parsing error");
                Ok(ObjectTimelineDetail::default())
            }
        }
    }
}
