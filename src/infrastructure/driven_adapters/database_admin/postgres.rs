//! PostgreSQL Database Admin Implementation
//!
//! Implements the DatabaseAdmin trait using SQLx against the admin pool.
//! DDL statements cannot take bind parameters, so identifiers and literals
//! are quoted here before being formatted into the statement.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::gateways::DatabaseAdmin;
use crate::shared::errors::AdminError;

const DISALLOW_CONNECTIONS: &str =
    "UPDATE pg_database SET datallowconn = FALSE WHERE datname = $1";

const TERMINATE_CONNECTIONS: &str = r#"
    SELECT pg_terminate_backend(pg_stat_activity.pid)
    FROM pg_stat_activity
    WHERE pg_stat_activity.datname = $1
      AND pid <> pg_backend_pid()
"#;

/// Quote an SQL identifier, doubling embedded double quotes
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote an SQL string literal, doubling embedded single quotes
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// PostgreSQL implementation of DatabaseAdmin
pub struct PostgresDatabaseAdmin {
    pool: PgPool,
}

impl PostgresDatabaseAdmin {
    /// Create a new PostgresDatabaseAdmin
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn execute_ddl(&self, statement: &str) -> Result<(), AdminError> {
        sqlx::raw_sql(statement).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DatabaseAdmin for PostgresDatabaseAdmin {
    async fn create_role(&self, role: &str, password: &str) -> Result<(), AdminError> {
        self.execute_ddl(&format!(
            "CREATE USER {} WITH PASSWORD {}",
            quote_identifier(role),
            quote_literal(password)
        ))
        .await
    }

    async fn grant_role(&self, role: &str, grantee: &str) -> Result<(), AdminError> {
        self.execute_ddl(&format!(
            "GRANT {} TO {}",
            quote_identifier(role),
            quote_identifier(grantee)
        ))
        .await
    }

    async fn create_database(&self, database: &str, owner: &str) -> Result<(), AdminError> {
        self.execute_ddl(&format!(
            "CREATE DATABASE {} WITH OWNER = {}",
            quote_identifier(database),
            quote_identifier(owner)
        ))
        .await
    }

    async fn disallow_connections(&self, database: &str) -> Result<(), AdminError> {
        sqlx::query(DISALLOW_CONNECTIONS)
            .bind(database)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn terminate_connections(&self, database: &str) -> Result<(), AdminError> {
        let terminated = sqlx::query(TERMINATE_CONNECTIONS)
            .bind(database)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(database, sessions = terminated.len(), "Terminated backend sessions");
        Ok(())
    }

    async fn drop_database(&self, database: &str) -> Result<(), AdminError> {
        self.execute_ddl(&format!("DROP DATABASE {}", quote_identifier(database)))
            .await
    }

    async fn drop_role(&self, role: &str) -> Result<(), AdminError> {
        self.execute_ddl(&format!("DROP USER {}", quote_identifier(role)))
            .await
    }

    async fn ping(&self) -> Result<(), AdminError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
