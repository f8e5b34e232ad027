//! Tag service.

use std::sync::Arc;

use qanda_common::{AppError, AppResult};
use qanda_db::{
    entities::tag,
    repositories::{NewTag, TagAttribute, TagFilter, TagRepository, TagSort},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use validator::Validate;

use super::resolvers::SiteConfigReader;

const fn default_page() -> u64 {
    1
}

const fn default_page_size() -> u64 {
    20
}

const fn default_limit() -> u64 {
    5
}

/// Input for paging through primary tags.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GetTagPageInput {
    /// 1-based page number.
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u64,
    /// Rows per page.
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: u64,
    /// Substring matched against slug and display name.
    pub slug_name: Option<String>,
    /// `popular`, `name` or `newest`; anything else leaves rows unordered.
    #[serde(default)]
    pub query_cond: String,
}

/// Input for tag name completion.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchTagsInput {
    /// Slug prefix; empty lists recommended tags.
    #[serde(default)]
    pub name: String,
    /// Maximum number of tags returned.
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
    /// Include reserved tags when listing recommended tags.
    #[serde(default)]
    pub has_reserved: bool,
}

/// One page of tags.
#[derive(Debug, Clone, Serialize)]
pub struct TagPage {
    /// Tags on this page.
    pub list: Vec<tag::Model>,
    /// Total matching rows across all pages.
    pub count: u64,
}

/// Tag service for business logic.
///
/// Reads the "tag required" site setting on every read and hands it to the
/// repository, which hides `recommend` when the setting is off.
#[derive(Clone)]
pub struct TagService {
    tag_repo: TagRepository,
    site_config: Arc<dyn SiteConfigReader>,
}

impl TagService {
    /// Create a new tag service.
    #[must_use]
    pub fn new(tag_repo: TagRepository, site_config: Arc<dyn SiteConfigReader>) -> Self {
        Self {
            tag_repo,
            site_config,
        }
    }

    /// Current "tag required" setting; a failed read counts as off.
    async fn tag_required(&self) -> bool {
        match self.site_config.tag_required().await {
            Ok(required) => required,
            Err(e) => {
                error!(error = %e, "Failed to read site config, treating tags as optional");
                false
            }
        }
    }

    /// Create tags.
    pub async fn add_tags(&self, tags: Vec<NewTag>) -> AppResult<Vec<tag::Model>> {
        self.tag_repo.add_tag_list(tags).await
    }

    /// Get an available tag by ID.
    pub async fn get_tag(&self, id: &str) -> AppResult<tag::Model> {
        let tag_required = self.tag_required().await;
        self.tag_repo
            .get_tag_by_id(id, tag_required)
            .await?
            .ok_or_else(|| AppError::TagNotFound(id.to_string()))
    }

    /// Get a tag by ID whatever its status.
    pub async fn get_tag_any_status(&self, id: &str) -> AppResult<tag::Model> {
        let tag_required = self.tag_required().await;
        self.tag_repo
            .get_tag_by_id_any_status(id, tag_required)
            .await?
            .ok_or_else(|| AppError::TagNotFound(id.to_string()))
    }

    /// Get an available tag by slug name.
    pub async fn get_tag_by_slug_name(&self, slug_name: &str) -> AppResult<tag::Model> {
        let tag_required = self.tag_required().await;
        self.tag_repo
            .get_tag_by_slug_name(slug_name, tag_required)
            .await?
            .ok_or_else(|| AppError::TagNotFound(slug_name.to_string()))
    }

    /// Get available tags by ID.
    pub async fn get_tags_by_ids(&self, ids: &[String]) -> AppResult<Vec<tag::Model>> {
        let tag_required = self.tag_required().await;
        self.tag_repo.get_tag_list_by_ids(ids, tag_required).await
    }

    /// Get tags by slug name.
    pub async fn get_tags_by_slug_names(&self, names: &[String]) -> AppResult<Vec<tag::Model>> {
        let tag_required = self.tag_required().await;
        self.tag_repo.get_tag_list_by_names(names, tag_required).await
    }

    /// Tag name completion.
    pub async fn search_tags(&self, input: SearchTagsInput) -> AppResult<Vec<tag::Model>> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let tag_required = self.tag_required().await;
        self.tag_repo
            .get_tag_list_by_name(&input.name, input.limit, input.has_reserved, tag_required)
            .await
    }

    /// All recommended tags.
    pub async fn get_recommend_tags(&self) -> AppResult<Vec<tag::Model>> {
        let tag_required = self.tag_required().await;
        self.tag_repo.get_recommend_tag_list(tag_required).await
    }

    /// All reserved tags.
    pub async fn get_reserved_tags(&self) -> AppResult<Vec<tag::Model>> {
        let tag_required = self.tag_required().await;
        self.tag_repo.get_reserved_tag_list(tag_required).await
    }

    /// Available tags matching every set field of `filter`.
    pub async fn get_tags(&self, filter: TagFilter) -> AppResult<Vec<tag::Model>> {
        let tag_required = self.tag_required().await;
        self.tag_repo.get_tag_list(filter, tag_required).await
    }

    /// One page of primary tags.
    pub async fn get_tag_page(&self, input: GetTagPageInput) -> AppResult<TagPage> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let tag_required = self.tag_required().await;
        let filter = TagFilter {
            slug_name: input.slug_name.filter(|s| !s.is_empty()),
            ..Default::default()
        };
        let (list, count) = self
            .tag_repo
            .get_tag_page(
                input.page,
                input.page_size,
                filter,
                TagSort::from_query(&input.query_cond),
                tag_required,
            )
            .await?;

        Ok(TagPage { list, count })
    }

    /// Soft-delete a tag.
    pub async fn remove_tag(&self, id: &str) -> AppResult<()> {
        self.tag_repo.remove_tag(id).await
    }

    /// Overwrite a tag row.
    pub async fn update_tag(&self, tag: tag::Model) -> AppResult<tag::Model> {
        self.tag_repo.update_tag(tag).await
    }

    /// Set a tag's question count.
    pub async fn update_question_count(&self, id: &str, question_count: i32) -> AppResult<()> {
        self.tag_repo
            .update_tag_question_count(id, question_count)
            .await
    }

    /// Point `slug_names` at a main tag, or make them canonical again with
    /// `None`.
    pub async fn update_synonyms(
        &self,
        slug_names: &[String],
        main_tag: Option<&tag::Model>,
    ) -> AppResult<()> {
        self.tag_repo
            .update_tag_synonym(
                slug_names,
                main_tag.map(|t| t.id.as_str()),
                main_tag.map(|t| t.slug_name.as_str()),
            )
            .await
    }

    /// Set a boolean attribute on tags by slug name.
    ///
    /// Unknown attribute names change nothing.
    pub async fn update_tags_attribute(
        &self,
        slug_names: &[String],
        attribute: &str,
        value: bool,
    ) -> AppResult<()> {
        let Some(attribute) = TagAttribute::from_name(attribute) else {
            debug!(attribute, "Ignoring unknown tag attribute");
            return Ok(());
        };
        self.tag_repo
            .update_tags_attribute(slug_names, attribute, value)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::resolvers::StaticSiteConfig;
    use async_trait::async_trait;
    use qanda_db::{entities::tag::TagStatus, test_utils::TestDatabase};

    struct FailingSiteConfig;

    #[async_trait]
    impl SiteConfigReader for FailingSiteConfig {
        async fn tag_required(&self) -> AppResult<bool> {
            Err(AppError::Database("site config: connection refused".to_string()))
        }
    }

    fn new_tag(slug: &str, recommend: bool, reserved: bool) -> NewTag {
        NewTag {
            slug_name: slug.to_string(),
            display_name: slug.to_uppercase(),
            original_text: format!("About {slug}"),
            parsed_text: format!("<p>About {slug}</p>"),
            recommend,
            reserved,
        }
    }

    async fn service(site_config: Arc<dyn SiteConfigReader>) -> TagService {
        let db = TestDatabase::sqlite().await.unwrap().into_shared();
        TagService::new(TagRepository::new(db), site_config)
    }

    async fn seeded(tag_required: bool) -> TagService {
        let service = service(Arc::new(StaticSiteConfig { tag_required })).await;
        service
            .add_tags(vec![
                new_tag("rust", true, false),
                new_tag("rust-async", false, false),
                new_tag("go", true, true),
                new_tag("meta", false, true),
            ])
            .await
            .unwrap();
        service
    }

    #[tokio::test]
    async fn test_recommend_visible_only_when_tags_required() {
        let masked = seeded(false).await;
        let tag = masked.get_tag_by_slug_name("rust").await.unwrap();
        assert!(!tag.recommend);
        assert!(
            masked
                .get_recommend_tags()
                .await
                .unwrap()
                .iter()
                .all(|t| !t.recommend)
        );

        let visible = seeded(true).await;
        let tag = visible.get_tag_by_slug_name("rust").await.unwrap();
        assert!(tag.recommend);
    }

    #[tokio::test]
    async fn test_failed_config_read_masks_recommend() {
        let service = service(Arc::new(FailingSiteConfig)).await;
        service
            .add_tags(vec![new_tag("rust", true, false)])
            .await
            .unwrap();

        let tag = service.get_tag_by_slug_name("rust").await.unwrap();
        assert!(!tag.recommend);
    }

    #[tokio::test]
    async fn test_missing_tag_is_not_found() {
        let service = seeded(true).await;

        let err = service.get_tag("missing").await.unwrap_err();
        assert!(matches!(err, AppError::TagNotFound(ref id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_remove_tag_keeps_row() {
        let service = seeded(true).await;
        let tag = service.get_tag_by_slug_name("meta").await.unwrap();

        service.remove_tag(&tag.id).await.unwrap();

        assert!(service.get_tag(&tag.id).await.unwrap_err().is_not_found());
        let removed = service.get_tag_any_status(&tag.id).await.unwrap();
        assert_eq!(removed.status, TagStatus::Deleted);
        assert_eq!(removed.slug_name, "meta");
    }

    #[tokio::test]
    async fn test_search_tags_validates_limit() {
        let service = seeded(true).await;

        let err = service
            .search_tags(SearchTagsInput {
                name: String::new(),
                limit: 0,
                has_reserved: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let tags = service
            .search_tags(SearchTagsInput {
                name: String::new(),
                limit: 5,
                has_reserved: false,
            })
            .await
            .unwrap();
        let slugs: Vec<_> = tags.iter().map(|t| t.slug_name.as_str()).collect();
        assert_eq!(slugs, vec!["rust"]);
    }

    #[tokio::test]
    async fn test_tag_page_excludes_synonyms() {
        let service = seeded(true).await;
        let main = service.get_tag_by_slug_name("rust").await.unwrap();
        service
            .update_synonyms(&["rust-async".to_string()], Some(&main))
            .await
            .unwrap();

        let page = service
            .get_tag_page(GetTagPageInput {
                page: 1,
                page_size: 10,
                slug_name: Some("rust".to_string()),
                query_cond: "name".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(page.count, 1);
        assert_eq!(page.list[0].slug_name, "rust");
    }

    #[tokio::test]
    async fn test_tag_page_rejects_page_zero() {
        let service = seeded(true).await;

        let err = service
            .get_tag_page(GetTagPageInput {
                page: 0,
                page_size: 10,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_attribute_is_noop() {
        let service = seeded(true).await;
        let names = vec!["meta".to_string()];

        service
            .update_tags_attribute(&names, "pinned", true)
            .await
            .unwrap();
        service
            .update_tags_attribute(&names, "recommend", true)
            .await
            .unwrap();

        let tag = service.get_tag_by_slug_name("meta").await.unwrap();
        assert!(tag.recommend);
        assert!(tag.reserved);
    }

    #[tokio::test]
    async fn test_update_question_count_to_zero() {
        let service = seeded(true).await;
        let tag = service.get_tag_by_slug_name("go").await.unwrap();

        service.update_question_count(&tag.id, 7).await.unwrap();
        service.update_question_count(&tag.id, 0).await.unwrap();

        assert_eq!(service.get_tag(&tag.id).await.unwrap().question_count, 0);
    }
}
