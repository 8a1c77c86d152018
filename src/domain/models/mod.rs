//! Domain Models
//!
//! Pure domain entities and value objects representing provisioned databases.

pub mod tenant_database;

pub use tenant_database::{
    ConnectionEnv, ProvisionedDatabase, ProvisioningSettings, TenantCredentials, TenantDatabaseId,
};
