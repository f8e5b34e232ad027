//! Common utilities and shared types for qanda.
//!
//! This crate provides foundational components used across all qanda crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Object kinds**: [`ObjectType`] shared by the timeline and revision code
//!
//! # Example
//!
//! ```no_run
//! use qanda_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID {id} for {}", config.database.url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod object_type;

pub use config::{Config, DatabaseConfig, SiteConfig};
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use object_type::ObjectType;
