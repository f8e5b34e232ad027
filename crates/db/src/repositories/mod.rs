//! Repositories.

pub mod activity;
pub mod revision;
pub mod site_settings;
pub mod tag;

pub use activity::{ActivityRepository, CreateActivityInput};
pub use revision::{CreateRevisionInput, RevisionRepository};
pub use site_settings::SiteSettingsRepository;
pub use tag::{NewTag, TagAttribute, TagFilter, TagRepository, TagSort};
