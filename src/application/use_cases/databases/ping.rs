//! Ping Use Case
//!
//! Checks that the administrative connection pool can serve queries.

use std::sync::Arc;

use crate::domain::gateways::DatabaseAdmin;
use crate::shared::errors::UseCaseError;

/// Use case for the admin connection health check
pub struct PingUseCase {
    database_admin: Arc<dyn DatabaseAdmin>,
}

impl PingUseCase {
    /// Create a new PingUseCase
    #[must_use]
    pub fn new(database_admin: Arc<dyn DatabaseAdmin>) -> Self {
        Self { database_admin }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Admin` if the admin connection cannot run a query.
    pub async fn execute(&self) -> Result<(), UseCaseError> {
        self.database_admin.ping().await.map_err(|err| {
            tracing::warn!(error = %err, "Admin connection health check failed");
            UseCaseError::from(err)
        })
    }
}
