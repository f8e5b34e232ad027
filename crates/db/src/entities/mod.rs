//! Database entities.

pub mod activity;
pub mod revision;
pub mod site_settings;
pub mod tag;

pub use activity::Entity as Activity;
pub use revision::Entity as Revision;
pub use site_settings::Entity as SiteSettings;
pub use tag::Entity as Tag;
