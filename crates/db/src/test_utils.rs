//! Test utilities for database operations.
//!
//! Provides helpers for setting up and tearing down test databases. Unit
//! tests run against an in-memory SQLite database with the real migrations
//! applied; integration tests can point at `PostgreSQL` through the
//! `TEST_DB_*` environment variables.

use std::sync::Arc;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::migrations::Migrator;

/// Tables owned by this crate, in an order safe for deletion.
const TABLES: [&str; 4] = ["activity", "revision", "tag", "site_settings"];

/// Test database configuration.
#[derive(Debug, Clone)]
pub struct TestDbConfig {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database username.
    pub username: String,
    /// Database password.
    pub password: String,
    /// Database name.
    pub database: String,
}

impl Default for TestDbConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("TEST_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("TEST_DB_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5433),
            username: std::env::var("TEST_DB_USER").unwrap_or_else(|_| "qanda_test".to_string()),
            password: std::env::var("TEST_DB_PASSWORD")
                .unwrap_or_else(|_| "qanda_test".to_string()),
            database: std::env::var("TEST_DB_NAME").unwrap_or_else(|_| "qanda_test".to_string()),
        }
    }
}

impl TestDbConfig {
    /// Get the database URL.
    #[must_use]
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

/// A migrated test database.
pub struct TestDatabase {
    /// Database connection.
    pub conn: DatabaseConnection,
}

impl TestDatabase {
    /// Connect to the `PostgreSQL` test database and apply migrations.
    pub async fn new() -> Result<Self, DbErr> {
        Self::with_config(TestDbConfig::default()).await
    }

    /// Connect to a `PostgreSQL` test database with custom configuration.
    pub async fn with_config(config: TestDbConfig) -> Result<Self, DbErr> {
        let conn = Database::connect(&config.database_url()).await?;
        Migrator::up(&conn, None).await?;

        info!(database = %config.database, "Connected to test database");

        Ok(Self { conn })
    }

    /// Create a fresh in-memory SQLite database with all migrations applied.
    ///
    /// The pool is pinned to a single connection: every SQLite connection
    /// to `:memory:` opens its own empty database.
    pub async fn sqlite() -> Result<Self, DbErr> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let conn = Database::connect(opt).await?;
        Migrator::up(&conn, None).await?;

        Ok(Self { conn })
    }

    /// Get the database connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Hand the connection over in the shape repositories take.
    #[must_use]
    pub fn into_shared(self) -> Arc<DatabaseConnection> {
        Arc::new(self.conn)
    }

    /// Delete all rows from every table owned by this crate.
    pub async fn cleanup(&self) -> Result<(), DbErr> {
        let backend = self.conn.get_database_backend();
        for table in TABLES {
            self.conn
                .execute(Statement::from_string(
                    backend,
                    format!("DELETE FROM \"{table}\""),
                ))
                .await?;
        }

        info!("Cleaned up test database");
        Ok(())
    }
}
