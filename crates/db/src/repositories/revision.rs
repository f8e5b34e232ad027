//! Revision repository.

use std::sync::Arc;

use crate::entities::{Revision, revision};
use chrono::Utc;
use qanda_common::{AppError, AppResult, IdGenerator};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// Input for storing a revision.
#[derive(Debug, Clone)]
pub struct CreateRevisionInput {
    /// Author.
    pub user_id: String,
    /// Object the revision snapshots.
    pub object_id: String,
    /// Title at the time of the revision.
    pub title: String,
    /// JSON-encoded object content.
    pub content: String,
    /// Edit summary.
    pub log: Option<String>,
}

/// Revision repository for database operations.
#[derive(Clone)]
pub struct RevisionRepository {
    db: Arc<DatabaseConnection>,
    id_gen: IdGenerator,
}

impl RevisionRepository {
    /// Create a new revision repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            id_gen: IdGenerator::new(),
        }
    }

    /// Store a revision.
    pub async fn create(&self, input: CreateRevisionInput) -> AppResult<revision::Model> {
        let model = revision::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(input.user_id),
            object_id: Set(input.object_id),
            title: Set(input.title),
            content: Set(input.content),
            log: Set(input.log),
            created_at: Set(Utc::now().into()),
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("insert revision", e))
    }

    /// Find a revision by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<revision::Model>> {
        Revision::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("get revision", e))
    }

    /// Get a revision by ID, failing when it does not exist.
    pub async fn get_revision(&self, id: &str) -> AppResult<revision::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::RevisionNotFound(id.to_string()))
    }

    /// All revisions of an object, oldest first.
    pub async fn find_by_object(&self, object_id: &str) -> AppResult<Vec<revision::Model>> {
        Revision::find()
            .filter(revision::Column::ObjectId.eq(object_id))
            .order_by_asc(revision::Column::CreatedAt)
            .order_by_asc(revision::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("get object revisions", e))
    }
}
