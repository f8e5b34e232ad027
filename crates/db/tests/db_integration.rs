//! Database integration tests.
//!
//! The `PostgreSQL` tests require a running instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `qanda_test`)
//!   `TEST_DB_PASSWORD` (default: `qanda_test`)
//!   `TEST_DB_NAME` (default: `qanda_test`)

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use qanda_db::{
    entities::{activity::ActivityKind, tag::TagStatus},
    repositories::{
        ActivityRepository, CreateActivityInput, NewTag, TagFilter, TagRepository, TagSort,
    },
    test_utils::{TestDatabase, TestDbConfig},
};

fn new_tag(slug: &str, display: &str) -> NewTag {
    NewTag {
        slug_name: slug.to_string(),
        display_name: display.to_string(),
        recommend: true,
        ..Default::default()
    }
}

async fn tag_lifecycle(db: TestDatabase) {
    db.cleanup().await.unwrap();
    let repo = TagRepository::new(db.into_shared());

    let created = repo
        .add_tag_list(vec![
            new_tag("postgres", "PostgreSQL"),
            new_tag("sqlite", "SQLite"),
            new_tag("pg", "Postgres shorthand"),
        ])
        .await
        .unwrap();
    assert_eq!(created.len(), 3);

    let main = created.iter().find(|t| t.slug_name == "postgres").unwrap();
    repo.update_tag_synonym(
        &["pg".to_string()],
        Some(main.id.as_str()),
        Some(main.slug_name.as_str()),
    )
    .await
    .unwrap();

    let (page, count) = repo
        .get_tag_page(
            1,
            10,
            TagFilter {
                slug_name: Some("post".to_string()),
                ..Default::default()
            },
            TagSort::Name,
            true,
        )
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(page[0].slug_name, "postgres");

    repo.remove_tag(&main.id).await.unwrap();
    assert!(repo.get_tag_by_id(&main.id, true).await.unwrap().is_none());
    let removed = repo
        .get_tag_by_id_any_status(&main.id, true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(removed.status, TagStatus::Deleted);
    assert_eq!(removed.display_name, "PostgreSQL");
}

#[tokio::test]
async fn test_tag_lifecycle_sqlite() {
    tag_lifecycle(TestDatabase::sqlite().await.unwrap()).await;
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_tag_lifecycle_postgres() {
    tag_lifecycle(TestDatabase::new().await.expect("Failed to connect")).await;
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_activity_timeline_order_postgres() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.cleanup().await.unwrap();
    let repo = ActivityRepository::new(Arc::new(db.conn));

    for kind in [
        ActivityKind::QuestionAsked,
        ActivityKind::QuestionVoteUp,
        ActivityKind::QuestionEdited,
    ] {
        repo.create(CreateActivityInput {
            user_id: "u1".to_string(),
            object_id: "q1".to_string(),
            original_object_id: "q1".to_string(),
            kind,
            revision_id: None,
        })
        .await
        .unwrap();
    }

    let all = repo.get_object_all_activity("q1", true).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].created_at <= w[1].created_at));

    let without_votes = repo.get_object_all_activity("q1", false).await.unwrap();
    assert_eq!(without_votes.len(), 2);
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(config.database_url().starts_with("postgres://"));
}
