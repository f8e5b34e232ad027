//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Site-wide defaults.
    #[serde(default)]
    pub site: SiteConfig,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Site-wide defaults used to seed the settings row on first start.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Whether every question must carry at least one tag.
    ///
    /// Tag reads only expose the `recommend` flag while this is enabled.
    #[serde(default)]
    pub required_tag: bool,
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `QANDA_ENV`)
    /// 3. Environment variables with `QANDA_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("QANDA_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("QANDA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("QANDA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config: Config = config::Config::builder()
            .set_override("database.url", "postgres://localhost/qanda")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.database.max_connections, 100);
        assert_eq!(config.database.min_connections, 5);
        assert!(!config.site.required_tag);
    }

    #[test]
    fn test_site_section_parsed() {
        let config: Config = config::Config::builder()
            .set_override("database.url", "postgres://localhost/qanda")
            .unwrap()
            .set_override("site.required_tag", true)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(config.site.required_tag);
    }
}
