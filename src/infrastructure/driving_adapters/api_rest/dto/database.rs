//! Database DTOs
//!
//! Data transfer objects for the provisioning endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::models::tenant_database::{ConnectionEnv, ProvisionedDatabase};

/// Connection env returned to the tenant, keyed by libpq variable names
#[derive(Clone, Serialize)]
pub struct ConnectionEnvDto {
    #[serde(rename = "FLYNN_POSTGRES")]
    pub flynn_postgres: String,
    #[serde(rename = "PGHOST")]
    pub pg_host: String,
    #[serde(rename = "PGUSER")]
    pub pg_user: String,
    #[serde(rename = "PGPASSWORD")]
    pub pg_password: String,
    #[serde(rename = "PGDATABASE")]
    pub pg_database: String,
    #[serde(rename = "DATABASE_URL")]
    pub database_url: String,
}

impl From<ConnectionEnv> for ConnectionEnvDto {
    fn from(env: ConnectionEnv) -> Self {
        Self {
            flynn_postgres: env.system_database,
            pg_host: env.host,
            pg_user: env.user,
            pg_password: env.password,
            pg_database: env.database,
            database_url: env.url,
        }
    }
}

/// Response body of `POST /databases`
#[derive(Clone, Serialize)]
pub struct ProvisionedDatabaseResponseDto {
    pub id: String,
    pub env: ConnectionEnvDto,
}

impl From<ProvisionedDatabase> for ProvisionedDatabaseResponseDto {
    fn from(provisioned: ProvisionedDatabase) -> Self {
        Self {
            id: provisioned.id.to_string(),
            env: provisioned.env.into(),
        }
    }
}

/// Parameters of `DELETE /databases`, from the query string or a form body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DropDatabaseParams {
    #[serde(default)]
    pub id: Option<String>,
}
