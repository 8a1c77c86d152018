//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - Administrative database access
//! - Configuration

pub mod config;
pub mod database;
pub mod database_admin;

pub use config::AppConfig;
pub use database_admin::PostgresDatabaseAdmin;
