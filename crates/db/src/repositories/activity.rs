//! Activity repository.

use std::sync::Arc;

use crate::entities::{
    Activity,
    activity::{self, ActivityKind},
};
use chrono::Utc;
use qanda_common::{AppError, AppResult, IdGenerator};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

/// Input for recording an activity.
#[derive(Debug, Clone)]
pub struct CreateActivityInput {
    /// Acting user.
    pub user_id: String,
    /// Object acted on.
    pub object_id: String,
    /// Question, answer or tag whose timeline the activity joins.
    pub original_object_id: String,
    /// What happened.
    pub kind: ActivityKind,
    /// Revision produced by the action, if any.
    pub revision_id: Option<String>,
}

/// Activity repository for database operations.
#[derive(Clone)]
pub struct ActivityRepository {
    db: Arc<DatabaseConnection>,
    id_gen: IdGenerator,
}

impl ActivityRepository {
    /// Create a new activity repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            id_gen: IdGenerator::new(),
        }
    }

    /// Record an activity.
    pub async fn create(&self, input: CreateActivityInput) -> AppResult<activity::Model> {
        let model = activity::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(input.user_id),
            object_id: Set(input.object_id),
            original_object_id: Set(input.original_object_id),
            activity_type: Set(input.kind.code()),
            revision_id: Set(input.revision_id),
            cancelled: Set(false),
            cancelled_at: Set(None),
            created_at: Set(Utc::now().into()),
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("insert activity", e))
    }

    /// Every activity on an object's timeline, oldest first.
    ///
    /// Voter-side vote activities are left out unless `show_vote` is set.
    pub async fn get_object_all_activity(
        &self,
        object_id: &str,
        show_vote: bool,
    ) -> AppResult<Vec<activity::Model>> {
        let mut query = Activity::find().filter(activity::Column::OriginalObjectId.eq(object_id));
        if !show_vote {
            query = query.filter(activity::Column::ActivityType.is_not_in(ActivityKind::vote_codes()));
        }

        query
            .order_by_asc(activity::Column::CreatedAt)
            .order_by_asc(activity::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("get object activity", e))
    }

    /// Mark an activity as cancelled (e.g. a retracted vote).
    pub async fn cancel(&self, id: &str) -> AppResult<()> {
        Activity::update_many()
            .col_expr(activity::Column::Cancelled, Expr::value(true))
            .col_expr(
                activity::Column::CancelledAt,
                Expr::value(Some(Utc::now().fixed_offset())),
            )
            .filter(activity::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("cancel activity", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDatabase;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn input(original_object_id: &str, kind: ActivityKind) -> CreateActivityInput {
        CreateActivityInput {
            user_id: "u1".to_string(),
            object_id: original_object_id.to_string(),
            original_object_id: original_object_id.to_string(),
            kind,
            revision_id: None,
        }
    }

    #[tokio::test]
    async fn test_get_object_all_activity_maps_rows() {
        let row = activity::Model {
            id: "a1".to_string(),
            user_id: "u1".to_string(),
            object_id: "q1".to_string(),
            original_object_id: "q1".to_string(),
            activity_type: ActivityKind::QuestionAsked.code(),
            revision_id: Some("r1".to_string()),
            cancelled: false,
            cancelled_at: None,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[row]])
                .into_connection(),
        );

        let repo = ActivityRepository::new(db);
        let result = repo.get_object_all_activity("q1", true).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind(), Some(ActivityKind::QuestionAsked));
    }

    #[tokio::test]
    async fn test_vote_activities_filtered_unless_requested() {
        let repo = ActivityRepository::new(TestDatabase::sqlite().await.unwrap().into_shared());
        repo.create(input("q1", ActivityKind::QuestionAsked)).await.unwrap();
        repo.create(input("q1", ActivityKind::QuestionVoteUp)).await.unwrap();
        repo.create(input("q1", ActivityKind::QuestionVotedUp)).await.unwrap();
        repo.create(input("q2", ActivityKind::QuestionAsked)).await.unwrap();

        let without_votes = repo.get_object_all_activity("q1", false).await.unwrap();
        let kinds: Vec<_> = without_votes.iter().filter_map(activity::Model::kind).collect();
        assert_eq!(
            kinds,
            vec![ActivityKind::QuestionAsked, ActivityKind::QuestionVotedUp]
        );

        let with_votes = repo.get_object_all_activity("q1", true).await.unwrap();
        assert_eq!(with_votes.len(), 3);
    }

    #[tokio::test]
    async fn test_cancel_sets_flag_and_timestamp() {
        let repo = ActivityRepository::new(TestDatabase::sqlite().await.unwrap().into_shared());
        let created = repo.create(input("q1", ActivityKind::QuestionVoteDown)).await.unwrap();

        repo.cancel(&created.id).await.unwrap();

        let rows = repo.get_object_all_activity("q1", true).await.unwrap();
        assert!(rows[0].cancelled);
        assert!(rows[0].cancelled_at.is_some());
    }
}
