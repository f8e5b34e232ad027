//! qanda server entry point.
//!
//! Prepares storage for the question and answer services: connects to the
//! database, applies pending migrations and seeds the site settings row.

use std::sync::Arc;

use qanda_common::Config;
use qanda_core::TagService;
use qanda_db::repositories::{SiteSettingsRepository, TagRepository};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qanda=debug,sea_orm=info".into()),
        )
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, "Failed to read .env file");
        }
    }

    info!("Starting qanda...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = Arc::new(qanda_db::init(&config.database).await?);
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    // Run migrations
    info!("Running database migrations...");
    qanda_db::migrate(&db).await?;
    info!("Migrations completed");

    // Seed site settings; an existing row wins over the config file
    let site_settings = SiteSettingsRepository::new(Arc::clone(&db));
    let settings = site_settings
        .get_or_create(config.site.required_tag)
        .await?;
    info!(required_tag = settings.required_tag, "Site settings ready");

    let tag_service = TagService::new(TagRepository::new(db), Arc::new(site_settings));
    let recommended = tag_service.get_recommend_tags().await?;
    let reserved = tag_service.get_reserved_tags().await?;
    info!(
        recommended = recommended.len(),
        reserved = reserved.len(),
        "Tag storage ready"
    );

    Ok(())
}
