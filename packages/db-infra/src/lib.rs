//! Shared database configuration and migration infrastructure.
//! Used by the backend and the migration CLI.

pub mod config;
pub mod error;
pub mod infra;

pub use config::db::{sanitize_db_url, DbKind, DbSettings};
pub use error::DbInfraError;
pub use infra::db::{bootstrap_db, connect_db, orchestrate_migration};
