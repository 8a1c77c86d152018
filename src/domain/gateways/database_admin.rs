//! Database Admin Gateway
//!
//! Abstract trait for the administrative DDL the provisioner issues.
//! Every method is a single independently committed statement.

use async_trait::async_trait;

use crate::shared::errors::AdminError;

/// Administrative operations on roles and databases
#[async_trait]
pub trait DatabaseAdmin: Send + Sync {
    /// Create a login role with the given password
    async fn create_role(&self, role: &str, password: &str) -> Result<(), AdminError>;

    /// Grant membership of `role` to `grantee`
    async fn grant_role(&self, role: &str, grantee: &str) -> Result<(), AdminError>;

    /// Create a database owned by `owner`
    async fn create_database(&self, database: &str, owner: &str) -> Result<(), AdminError>;

    /// Mark the database as not accepting new connections
    async fn disallow_connections(&self, database: &str) -> Result<(), AdminError>;

    /// Terminate every backend connected to the database except our own
    async fn terminate_connections(&self, database: &str) -> Result<(), AdminError>;

    /// Drop the database
    async fn drop_database(&self, database: &str) -> Result<(), AdminError>;

    /// Drop the role
    async fn drop_role(&self, role: &str) -> Result<(), AdminError>;

    /// Run a trivial query to check the admin connection
    async fn ping(&self) -> Result<(), AdminError>;
}
