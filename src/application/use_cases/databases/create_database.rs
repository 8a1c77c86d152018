//! Create Database Use Case
//!
//! Provisions a new role and a database owned by it.

use std::sync::Arc;

use crate::domain::gateways::DatabaseAdmin;
use crate::domain::models::tenant_database::{
    ConnectionEnv, ProvisionedDatabase, ProvisioningSettings, TenantCredentials,
};
use crate::shared::errors::{AdminError, UseCaseError};

/// Use case for provisioning a tenant database
pub struct CreateDatabaseUseCase {
    database_admin: Arc<dyn DatabaseAdmin>,
    settings: ProvisioningSettings,
}

impl CreateDatabaseUseCase {
    /// Create a new CreateDatabaseUseCase
    #[must_use]
    pub fn new(database_admin: Arc<dyn DatabaseAdmin>, settings: ProvisioningSettings) -> Self {
        Self {
            database_admin,
            settings,
        }
    }

    /// Execute the use case
    ///
    /// Creates the role, grants it to the admin role, then creates the
    /// database. A failure after the role exists drops the role again before
    /// the triggering error is returned.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Admin` if any statement fails.
    pub async fn execute(&self) -> Result<ProvisionedDatabase, UseCaseError> {
        let credentials = TenantCredentials::generate();
        let role = credentials.role();
        let database = credentials.database();

        tracing::info!(role, database, "Provisioning new database");

        self.database_admin
            .create_role(role, credentials.password())
            .await?;

        if let Err(err) = self
            .database_admin
            .grant_role(role, &self.settings.admin_role)
            .await
        {
            return Err(self.rollback_role(role, err).await);
        }

        if let Err(err) = self.database_admin.create_database(database, role).await {
            return Err(self.rollback_role(role, err).await);
        }

        let provisioned = ProvisionedDatabase {
            id: credentials.id(),
            env: ConnectionEnv::new(&self.settings, &credentials),
        };

        tracing::info!(id = %provisioned.id, "Database provisioned successfully");

        Ok(provisioned)
    }

    /// Best-effort removal of a half-provisioned role.
    ///
    /// The cleanup outcome is only logged; the returned error is always the
    /// one that triggered the rollback.
    async fn rollback_role(&self, role: &str, cause: AdminError) -> UseCaseError {
        tracing::warn!(role, error = %cause, "Provisioning failed, dropping role");

        match self.database_admin.drop_role(role).await {
            Ok(()) => tracing::info!(role, "Role dropped after failed provisioning"),
            Err(cleanup_err) => {
                tracing::warn!(role, error = %cleanup_err, "Best-effort role cleanup failed");
            }
        }

        UseCaseError::Admin(cause)
    }
}
