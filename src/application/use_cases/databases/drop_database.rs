//! Drop Database Use Case
//!
//! Removes a tenant database and its owning role.

use std::sync::Arc;

use crate::domain::gateways::DatabaseAdmin;
use crate::domain::models::tenant_database::TenantDatabaseId;
use crate::shared::errors::UseCaseError;

/// Use case for deprovisioning a tenant database
pub struct DropDatabaseUseCase {
    database_admin: Arc<dyn DatabaseAdmin>,
}

impl DropDatabaseUseCase {
    /// Create a new DropDatabaseUseCase
    #[must_use]
    pub fn new(database_admin: Arc<dyn DatabaseAdmin>) -> Self {
        Self { database_admin }
    }

    /// Execute the use case
    ///
    /// New connections are refused and existing sessions terminated before
    /// the database is dropped, so the drop does not fail with "database is
    /// being accessed by other users". Every step stops on error.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Domain` if `raw_id` is not a valid identifier;
    /// no statement is issued in that case.
    /// Returns `UseCaseError::Admin` if any statement fails.
    pub async fn execute(&self, raw_id: &str) -> Result<(), UseCaseError> {
        let id = TenantDatabaseId::parse(raw_id).map_err(|err| {
            tracing::warn!(id = raw_id, "Rejected malformed database id");
            err
        })?;
        let database = id.database();

        tracing::info!(%id, "Dropping database");

        self.database_admin.disallow_connections(database).await?;
        self.database_admin.terminate_connections(database).await?;
        self.database_admin.drop_database(database).await?;
        self.database_admin.drop_role(id.role()).await?;

        tracing::info!(%id, "Database dropped successfully");
        Ok(())
    }
}
