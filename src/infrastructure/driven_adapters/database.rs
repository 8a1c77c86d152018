//! Database Connection Management
//!
//! Builds the administrative connection pool used for all DDL.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use super::config::DatabaseConfig;

/// Maintenance database the admin pool connects to
const ADMIN_DATABASE: &str = "postgres";

/// Connection options for the admin role
#[must_use]
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .username(&config.user)
        .password(&config.password)
        .database(ADMIN_DATABASE);

    match config.ssl_mode {
        Some(mode) => options.ssl_mode(mode),
        None => options,
    }
}

/// Create the admin PostgreSQL connection pool from configuration
///
/// The pool connects eagerly so an unreachable server fails at startup.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_with(connect_options(config))
        .await
}
