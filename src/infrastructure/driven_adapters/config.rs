//! Application Configuration
//!
//! Loads configuration from an optional file and the process environment.
//! Variable names follow the libpq conventions (`PGHOST`, `PGUSER`, ...).

use std::fmt;
use std::str::FromStr;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, Map};
use serde::Deserialize;
use sqlx::postgres::PgSslMode;
use zeroize::Zeroizing;

use crate::domain::models::tenant_database::ProvisioningSettings;

const DEFAULT_ADMIN_USER: &str = "flynn";
const DEFAULT_SYSTEM_DATABASE: &str = "postgres";
const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Flat view of the environment, before validation
#[derive(Deserialize)]
struct EnvSettings {
    pghost: Option<String>,
    pguser: String,
    pgpassword: Option<String>,
    pgsslmode: Option<String>,
    flynn_postgres: String,
    listen_host: String,
    port: u16,
    db_max_connections: u32,
    db_min_connections: u32,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Admin database connection configuration
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: Zeroizing<String>,
    pub ssl_mode: Option<PgSslMode>,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

/// Values propagated into provisioned databases' env
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub system_database: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub service: ServiceConfig,
}

impl AppConfig {
    /// Load configuration from `config/default` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `PGHOST` or `PGPASSWORD` is missing, or a
    /// value cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("config/default").required(false))
                .add_source(Environment::default().ignore_empty(true)),
        )
    }

    /// Build configuration from an explicit set of environment variables
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::load`].
    pub fn from_env_map(vars: Map<String, String>) -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder().add_source(Environment::default().ignore_empty(true).source(Some(vars))),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: EnvSettings = builder
            .set_default("pguser", DEFAULT_ADMIN_USER)?
            .set_default("flynn_postgres", DEFAULT_SYSTEM_DATABASE)?
            .set_default("listen_host", DEFAULT_LISTEN_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("db_max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))?
            .set_default("db_min_connections", i64::from(DEFAULT_MIN_CONNECTIONS))?
            .build()?
            .try_deserialize()?;

        Self::try_from(settings)
    }

    /// Settings the create use case stamps onto every provisioned database
    #[must_use]
    pub fn provisioning_settings(&self) -> ProvisioningSettings {
        ProvisioningSettings {
            admin_role: self.database.user.clone(),
            host: self.database.host.clone(),
            system_database: self.service.system_database.clone(),
        }
    }
}

impl TryFrom<EnvSettings> for AppConfig {
    type Error = ConfigError;

    fn try_from(settings: EnvSettings) -> Result<Self, Self::Error> {
        let host = settings.pghost.ok_or_else(|| {
            ConfigError::Message(
                "PGHOST must be set to the target database server hostname".to_string(),
            )
        })?;
        let password = settings.pgpassword.ok_or_else(|| {
            ConfigError::Message(
                "PGPASSWORD must be set to the database admin user password".to_string(),
            )
        })?;
        let ssl_mode = settings
            .pgsslmode
            .map(|mode| {
                PgSslMode::from_str(&mode).map_err(|_| {
                    ConfigError::Message(format!("PGSSLMODE {mode:?} is not a valid SSL mode"))
                })
            })
            .transpose()?;

        Ok(Self {
            server: ServerConfig {
                host: settings.listen_host,
                port: settings.port,
            },
            database: DatabaseConfig {
                host,
                user: settings.pguser,
                password: Zeroizing::new(password),
                ssl_mode,
                max_connections: settings.db_max_connections,
                min_connections: settings.db_min_connections,
            },
            service: ServiceConfig {
                system_database: settings.flynn_postgres,
            },
        })
    }
}
