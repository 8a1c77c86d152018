//! Tenant Database Domain Model
//!
//! A provisioned Postgres database together with the role that owns it.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use zeroize::Zeroizing;

use crate::shared::errors::DomainError;

/// Number of random bytes behind every generated role, password and database name
pub const TOKEN_BYTES: usize = 16;

/// Port advertised in connection URLs handed to tenants
pub const POSTGRES_PORT: u16 = 5432;

/// Path prefix that may precede an identifier in drop requests
const ID_PATH_PREFIX: &str = "/databases/";

/// Generate a random lowercase hex token from `TOKEN_BYTES` bytes
#[must_use]
pub fn random_hex_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Composite `role:database` identifier of a tenant database
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantDatabaseId {
    role: String,
    database: String,
}

impl TenantDatabaseId {
    /// Create an identifier from its parts
    #[must_use]
    pub fn new(role: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            database: database.into(),
        }
    }

    /// Parse an identifier, accepting an optional `/databases/` prefix
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTenantId` unless the value splits on its
    /// first `:` into a non-empty role and a non-empty database.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw.strip_prefix(ID_PATH_PREFIX).unwrap_or(raw);

        match value.split_once(':') {
            Some((role, database)) if !role.is_empty() && !database.is_empty() => {
                Ok(Self::new(role, database))
            }
            _ => Err(DomainError::InvalidTenantId(raw.to_string())),
        }
    }

    /// Owning role name
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Database name
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl fmt::Display for TenantDatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.role, self.database)
    }
}

impl FromStr for TenantDatabaseId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Freshly generated credentials for a new tenant database
#[derive(Clone)]
pub struct TenantCredentials {
    role: String,
    password: Zeroizing<String>,
    database: String,
}

impl TenantCredentials {
    /// Generate three independent random tokens
    #[must_use]
    pub fn generate() -> Self {
        Self {
            role: random_hex_token(),
            password: Zeroizing::new(random_hex_token()),
            database: random_hex_token(),
        }
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Identifier referencing the database these credentials belong to
    #[must_use]
    pub fn id(&self) -> TenantDatabaseId {
        TenantDatabaseId::new(self.role.clone(), self.database.clone())
    }
}

impl fmt::Debug for TenantCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantCredentials")
            .field("role", &self.role)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Service-wide values that end up in every provisioned database's env
#[derive(Debug, Clone)]
pub struct ProvisioningSettings {
    /// Administrative role that every tenant role is granted to
    pub admin_role: String,
    /// Host tenants connect to
    pub host: String,
    /// Identifier of the system Postgres cluster, echoed as `FLYNN_POSTGRES`
    pub system_database: String,
}

/// Connection parameters a tenant application uses to reach its database
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionEnv {
    pub system_database: String,
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub url: String,
}

impl ConnectionEnv {
    /// Assemble the env for the given credentials
    #[must_use]
    pub fn new(settings: &ProvisioningSettings, credentials: &TenantCredentials) -> Self {
        let url = format!(
            "postgres://{}:{}@{}:{}/{}",
            credentials.role(),
            credentials.password(),
            settings.host,
            POSTGRES_PORT,
            credentials.database()
        );

        Self {
            system_database: settings.system_database.clone(),
            host: settings.host.clone(),
            user: credentials.role().to_string(),
            password: credentials.password().to_string(),
            database: credentials.database().to_string(),
            url,
        }
    }
}

impl fmt::Debug for ConnectionEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionEnv")
            .field("system_database", &self.system_database)
            .field("host", &self.host)
            .field("user", &self.user)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

/// Result of a successful provisioning
#[derive(Debug, Clone)]
pub struct ProvisionedDatabase {
    pub id: TenantDatabaseId,
    pub env: ConnectionEnv,
}
