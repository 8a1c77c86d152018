//! Domain Layer
//!
//! Contains the domain models and gateway traits (ports).
//! This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;

pub use gateways::database_admin::DatabaseAdmin;
pub use models::tenant_database::{
    ConnectionEnv, ProvisionedDatabase, ProvisioningSettings, TenantCredentials, TenantDatabaseId,
};
