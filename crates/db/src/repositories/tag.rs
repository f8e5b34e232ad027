//! Tag repository.
//!
//! Every read takes a `tag_required` flag carrying the site-wide "tag
//! required" setting. When it is `false` the `recommend` field of every
//! returned row is forced to `false`; the stored value is left untouched.

use std::sync::Arc;

use crate::entities::{Tag, tag, tag::TagStatus};
use chrono::Utc;
use qanda_common::{AppError, AppResult, IdGenerator};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, sea_query::Expr,
};

/// Revision marker stored on freshly inserted tags.
pub const INITIAL_REVISION_ID: &str = "0";

/// Legacy main tag id meaning "no main tag".
const LEGACY_CANONICAL_MAIN_TAG_ID: &str = "0";

/// Normalize a synonym link: an empty or legacy `"0"` id means canonical.
fn main_tag_link(main_tag_id: Option<&str>) -> Option<&str> {
    main_tag_id.filter(|id| !id.is_empty() && *id != LEGACY_CANONICAL_MAIN_TAG_ID)
}

/// Input for creating a tag.
#[derive(Debug, Clone, Default)]
pub struct NewTag {
    /// URL-safe name, unique across all tags.
    pub slug_name: String,
    /// Human readable name.
    pub display_name: String,
    /// Description as written.
    pub original_text: String,
    /// Rendered description.
    pub parsed_text: String,
    /// Recommended tag.
    pub recommend: bool,
    /// Reserved tag.
    pub reserved: bool,
}

/// Boolean tag attribute that can be toggled in bulk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAttribute {
    /// The `recommend` column.
    Recommend,
    /// The `reserved` column.
    Reserved,
}

impl TagAttribute {
    /// Parse an attribute name. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommend" => Some(Self::Recommend),
            "reserved" => Some(Self::Reserved),
            _ => None,
        }
    }

    const fn column(self) -> tag::Column {
        match self {
            Self::Recommend => tag::Column::Recommend,
            Self::Reserved => tag::Column::Reserved,
        }
    }
}

/// Ordering of a tag page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagSort {
    /// Most questions first.
    Popular,
    /// Slug name ascending.
    Name,
    /// Most recently created first.
    Newest,
    /// Whatever order the store returns.
    #[default]
    Unordered,
}

impl TagSort {
    /// Parse a sort mode. Unknown modes fall back to [`TagSort::Unordered`].
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        match query {
            "popular" => Self::Popular,
            "name" => Self::Name,
            "newest" => Self::Newest,
            _ => Self::Unordered,
        }
    }
}

/// Equality filter over tag columns. Each `Some` field becomes a predicate.
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    /// Exact id.
    pub id: Option<String>,
    /// Exact slug name. [`TagRepository::get_tag_page`] treats it as a
    /// substring search over slug and display name instead.
    pub slug_name: Option<String>,
    /// Exact display name.
    pub display_name: Option<String>,
    /// Exact main tag id.
    pub main_tag_id: Option<String>,
    /// Exact main tag slug name.
    pub main_tag_slug_name: Option<String>,
    /// Recommend flag.
    pub recommend: Option<bool>,
    /// Reserved flag.
    pub reserved: Option<bool>,
    /// Exact description source.
    pub original_text: Option<String>,
    /// Exact rendered description.
    pub parsed_text: Option<String>,
    /// Exact follower count.
    pub follow_count: Option<i32>,
    /// Exact question count.
    pub question_count: Option<i32>,
    /// Exact revision id.
    pub revision_id: Option<String>,
}

impl TagFilter {
    fn apply(self, mut query: Select<Tag>) -> Select<Tag> {
        if let Some(id) = self.id {
            query = query.filter(tag::Column::Id.eq(id));
        }
        if let Some(slug_name) = self.slug_name {
            query = query.filter(tag::Column::SlugName.eq(slug_name));
        }
        if let Some(display_name) = self.display_name {
            query = query.filter(tag::Column::DisplayName.eq(display_name));
        }
        if let Some(main_tag_id) = self.main_tag_id {
            query = query.filter(tag::Column::MainTagId.eq(main_tag_id));
        }
        if let Some(main_tag_slug_name) = self.main_tag_slug_name {
            query = query.filter(tag::Column::MainTagSlugName.eq(main_tag_slug_name));
        }
        if let Some(recommend) = self.recommend {
            query = query.filter(tag::Column::Recommend.eq(recommend));
        }
        if let Some(reserved) = self.reserved {
            query = query.filter(tag::Column::Reserved.eq(reserved));
        }
        if let Some(original_text) = self.original_text {
            query = query.filter(tag::Column::OriginalText.eq(original_text));
        }
        if let Some(parsed_text) = self.parsed_text {
            query = query.filter(tag::Column::ParsedText.eq(parsed_text));
        }
        if let Some(follow_count) = self.follow_count {
            query = query.filter(tag::Column::FollowCount.eq(follow_count));
        }
        if let Some(question_count) = self.question_count {
            query = query.filter(tag::Column::QuestionCount.eq(question_count));
        }
        if let Some(revision_id) = self.revision_id {
            query = query.filter(tag::Column::RevisionId.eq(revision_id));
        }
        query
    }
}

/// Hide the recommend flag unless the site requires tags.
fn mask_recommend(tags: &mut [tag::Model], tag_required: bool) {
    if !tag_required {
        for tag in tags {
            tag.recommend = false;
        }
    }
}

/// Active model with every column set, for inserts and full-row updates.
fn active_model(model: tag::Model) -> tag::ActiveModel {
    tag::ActiveModel {
        id: Set(model.id),
        slug_name: Set(model.slug_name),
        display_name: Set(model.display_name),
        original_text: Set(model.original_text),
        parsed_text: Set(model.parsed_text),
        main_tag_id: Set(model.main_tag_id),
        main_tag_slug_name: Set(model.main_tag_slug_name),
        recommend: Set(model.recommend),
        reserved: Set(model.reserved),
        status: Set(model.status),
        follow_count: Set(model.follow_count),
        question_count: Set(model.question_count),
        revision_id: Set(model.revision_id),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

fn available() -> Select<Tag> {
    Tag::find().filter(tag::Column::Status.eq(TagStatus::Available))
}

/// Standard ordering for multi-row lookups.
fn order_by_weight(query: Select<Tag>) -> Select<Tag> {
    query
        .order_by_desc(tag::Column::Recommend)
        .order_by_desc(tag::Column::Reserved)
        .order_by_desc(tag::Column::Id)
}

/// Tag repository for database operations.
#[derive(Clone)]
pub struct TagRepository {
    db: Arc<DatabaseConnection>,
    id_gen: IdGenerator,
}

impl TagRepository {
    /// Create a new tag repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            id_gen: IdGenerator::new(),
        }
    }

    /// Insert a batch of tags, assigning each a fresh id.
    ///
    /// Atomicity of the batch is up to the store.
    pub async fn add_tag_list(&self, tags: Vec<NewTag>) -> AppResult<Vec<tag::Model>> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let now = Utc::now().fixed_offset();
        let ids = self.id_gen.generate_batch(tags.len());
        let models: Vec<tag::Model> = tags
            .into_iter()
            .zip(ids)
            .map(|(input, id)| tag::Model {
                id,
                slug_name: input.slug_name,
                display_name: input.display_name,
                original_text: input.original_text,
                parsed_text: input.parsed_text,
                main_tag_id: None,
                main_tag_slug_name: None,
                recommend: input.recommend,
                reserved: input.reserved,
                status: TagStatus::Available,
                follow_count: 0,
                question_count: 0,
                revision_id: INITIAL_REVISION_ID.to_string(),
                created_at: now,
                updated_at: now,
            })
            .collect();

        Tag::insert_many(models.iter().cloned().map(active_model))
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("insert tag list", e))?;

        Ok(models)
    }

    /// Available tags with the given ids.
    pub async fn get_tag_list_by_ids(
        &self,
        ids: &[String],
        tag_required: bool,
    ) -> AppResult<Vec<tag::Model>> {
        let mut tags = order_by_weight(available().filter(tag::Column::Id.is_in(ids.to_vec())))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("get tag list by ids", e))?;

        mask_recommend(&mut tags, tag_required);
        Ok(tags)
    }

    /// Find an available tag by slug name.
    pub async fn get_tag_by_slug_name(
        &self,
        slug_name: &str,
        tag_required: bool,
    ) -> AppResult<Option<tag::Model>> {
        let tag = available()
            .filter(tag::Column::SlugName.eq(slug_name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("get tag by slug name", e))?;

        Ok(tag.map(|mut tag| {
            mask_recommend(std::slice::from_mut(&mut tag), tag_required);
            tag
        }))
    }

    /// Find an available tag by id.
    pub async fn get_tag_by_id(
        &self,
        id: &str,
        tag_required: bool,
    ) -> AppResult<Option<tag::Model>> {
        let tag = available()
            .filter(tag::Column::Id.eq(id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("get tag by id", e))?;

        Ok(tag.map(|mut tag| {
            mask_recommend(std::slice::from_mut(&mut tag), tag_required);
            tag
        }))
    }

    /// Find a tag by id whatever its status.
    pub async fn get_tag_by_id_any_status(
        &self,
        id: &str,
        tag_required: bool,
    ) -> AppResult<Option<tag::Model>> {
        let tag = Tag::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("get tag by id", e))?;

        Ok(tag.map(|mut tag| {
            mask_recommend(std::slice::from_mut(&mut tag), tag_required);
            tag
        }))
    }

    /// Search available tags by slug name prefix.
    ///
    /// An empty `name` lists recommended tags instead. Reserved tags are
    /// only included when `has_reserved` is set.
    pub async fn get_tag_list_by_name(
        &self,
        name: &str,
        limit: u64,
        has_reserved: bool,
        tag_required: bool,
    ) -> AppResult<Vec<tag::Model>> {
        let mut query = available();
        if name.is_empty() {
            query = query.filter(tag::Column::Recommend.eq(true));
        } else {
            query = query.filter(tag::Column::SlugName.like(format!("{name}%")));
        }
        if !has_reserved {
            query = query.filter(tag::Column::Reserved.eq(false));
        }

        let mut tags = order_by_weight(query.order_by_asc(tag::Column::SlugName))
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("get tag list by name", e))?;

        mask_recommend(&mut tags, tag_required);
        Ok(tags)
    }

    /// All tags flagged recommend, by slug name.
    ///
    /// Deleted tags are not filtered out here.
    pub async fn get_recommend_tag_list(&self, tag_required: bool) -> AppResult<Vec<tag::Model>> {
        let mut tags = Tag::find()
            .filter(tag::Column::Recommend.eq(true))
            .order_by_asc(tag::Column::SlugName)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("get recommend tag list", e))?;

        mask_recommend(&mut tags, tag_required);
        Ok(tags)
    }

    /// All tags flagged reserved, by slug name.
    ///
    /// Deleted tags are not filtered out here.
    pub async fn get_reserved_tag_list(&self, tag_required: bool) -> AppResult<Vec<tag::Model>> {
        let mut tags = Tag::find()
            .filter(tag::Column::Reserved.eq(true))
            .order_by_asc(tag::Column::SlugName)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("get reserved tag list", e))?;

        mask_recommend(&mut tags, tag_required);
        Ok(tags)
    }

    /// Tags whose slug name is in `names`.
    pub async fn get_tag_list_by_names(
        &self,
        names: &[String],
        tag_required: bool,
    ) -> AppResult<Vec<tag::Model>> {
        let mut tags =
            order_by_weight(Tag::find().filter(tag::Column::SlugName.is_in(names.to_vec())))
                .all(self.db.as_ref())
                .await
                .map_err(|e| AppError::database("get tag list by names", e))?;

        mask_recommend(&mut tags, tag_required);
        Ok(tags)
    }

    /// Soft-delete a tag.
    pub async fn remove_tag(&self, id: &str) -> AppResult<()> {
        Tag::update_many()
            .col_expr(
                tag::Column::Status,
                Expr::value(TagStatus::Deleted.to_value()),
            )
            .col_expr(tag::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(tag::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("remove tag", e))?;
        Ok(())
    }

    /// Overwrite every column of the tag with the given id.
    pub async fn update_tag(&self, mut tag: tag::Model) -> AppResult<tag::Model> {
        let id = tag.id.clone();
        if main_tag_link(tag.main_tag_id.as_deref()).is_none() {
            tag.main_tag_id = None;
            tag.main_tag_slug_name = None;
        }
        let mut active = active_model(tag);
        active.updated_at = Set(Utc::now().fixed_offset());

        active.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::TagNotFound(id),
            e => AppError::database("update tag", e),
        })
    }

    /// Set the question count, writing the column even when it is zero.
    pub async fn update_tag_question_count(&self, id: &str, question_count: i32) -> AppResult<()> {
        Tag::update_many()
            .col_expr(tag::Column::QuestionCount, Expr::value(question_count))
            .filter(tag::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("update tag question count", e))?;
        Ok(())
    }

    /// Point every listed tag at a main tag, or clear the link with `None`.
    ///
    /// Both link columns are always written. An empty or `"0"` main tag id
    /// clears the link like `None`.
    pub async fn update_tag_synonym(
        &self,
        slug_names: &[String],
        main_tag_id: Option<&str>,
        main_tag_slug_name: Option<&str>,
    ) -> AppResult<()> {
        let main_tag_id = main_tag_link(main_tag_id);
        let main_tag_slug_name = main_tag_id.and(main_tag_slug_name);

        Tag::update_many()
            .col_expr(
                tag::Column::MainTagId,
                Expr::value(main_tag_id.map(str::to_string)),
            )
            .col_expr(
                tag::Column::MainTagSlugName,
                Expr::value(main_tag_slug_name.map(str::to_string)),
            )
            .filter(tag::Column::SlugName.is_in(slug_names.to_vec()))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("update tag synonym", e))?;
        Ok(())
    }

    /// Set one boolean attribute on every listed tag.
    pub async fn update_tags_attribute(
        &self,
        slug_names: &[String],
        attribute: TagAttribute,
        value: bool,
    ) -> AppResult<()> {
        Tag::update_many()
            .col_expr(attribute.column(), Expr::value(value))
            .filter(tag::Column::SlugName.is_in(slug_names.to_vec()))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("update tags attribute", e))?;
        Ok(())
    }

    /// Available tags matching every field set on `filter`.
    pub async fn get_tag_list(
        &self,
        filter: TagFilter,
        tag_required: bool,
    ) -> AppResult<Vec<tag::Model>> {
        let mut tags = filter
            .apply(available())
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::database("get tag list", e))?;

        mask_recommend(&mut tags, tag_required);
        Ok(tags)
    }

    /// One page of canonical, available tags plus the total match count.
    ///
    /// `page` is 1-based. A slug name on the filter matches as a substring
    /// of either the slug or the display name.
    pub async fn get_tag_page(
        &self,
        page: u64,
        page_size: u64,
        mut filter: TagFilter,
        sort: TagSort,
        tag_required: bool,
    ) -> AppResult<(Vec<tag::Model>, u64)> {
        let mut query = available().filter(tag::Column::MainTagId.is_null());

        if let Some(search) = filter.slug_name.take().filter(|s| !s.is_empty()) {
            let pattern = format!("%{search}%");
            query = query.filter(
                Condition::any()
                    .add(tag::Column::SlugName.like(pattern.clone()))
                    .add(tag::Column::DisplayName.like(pattern)),
            );
        }
        query = filter.apply(query);

        query = match sort {
            TagSort::Popular => query.order_by_desc(tag::Column::QuestionCount),
            TagSort::Name => query.order_by_asc(tag::Column::SlugName),
            TagSort::Newest => query.order_by_desc(tag::Column::CreatedAt),
            TagSort::Unordered => query,
        };

        let paginator = query.paginate(self.db.as_ref(), page_size.max(1));
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AppError::database("count tag page", e))?;
        let mut tags = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| AppError::database("get tag page", e))?;

        mask_recommend(&mut tags, tag_required);
        Ok((tags, total))
    }
}
