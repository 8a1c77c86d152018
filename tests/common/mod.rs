//! Common test utilities for e2e tests
//!
//! Provides test infrastructure for spinning up a PostgreSQL container and
//! building the provisioner router against its superuser.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tower::util::ServiceExt;

use postgres_provisioner::domain::models::tenant_database::ProvisioningSettings;
use postgres_provisioner::infrastructure::driven_adapters::database_admin::PostgresDatabaseAdmin;
use postgres_provisioner::infrastructure::driving_adapters::api_rest::{router, AppState};

/// Superuser of the test container, used as the admin role
pub const ADMIN_ROLE: &str = "postgres";

/// Test application context
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    pub host: String,
    pub port: u16,
    _container: ContainerAsync<Postgres>,
}

impl TestApp {
    /// Create a new test application against a fresh PostgreSQL server
    pub async fn new() -> Self {
        Self::with_admin_role(ADMIN_ROLE).await
    }

    /// Create a test application whose provisioned roles are granted to `admin_role`
    pub async fn with_admin_role(admin_role: &str) -> Self {
        let container = Postgres::default()
            .with_tag("16-alpine")
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let host = container
            .get_host()
            .await
            .expect("Failed to get host")
            .to_string();
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get port");

        let database_url = format!("postgres://postgres:postgres@{host}:{port}/postgres");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .min_connections(1)
            .connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        let settings = ProvisioningSettings {
            admin_role: admin_role.to_string(),
            host: host.clone(),
            system_database: "postgres".to_string(),
        };
        let database_admin = Arc::new(PostgresDatabaseAdmin::new(pool.clone()));
        let router = router(AppState::new(database_admin, settings));

        Self {
            router,
            pool,
            host,
            port,
            _container: container,
        }
    }

    /// Send a request through the router and collect the body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, body.to_vec())
    }

    /// POST /databases and decode the response
    pub async fn create_database(&self) -> ProvisionedDatabaseResponse {
        let (status, body) = self.send(create_request()).await;
        assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&body));
        serde_json::from_slice(&body).expect("Invalid create response")
    }

    /// Connection options for a tenant, pointed at the container's mapped port
    pub fn tenant_options(&self, env: &ConnectionEnvResponse) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&env.pg_user)
            .password(&env.pg_password)
            .database(&env.pg_database)
    }

    /// Open a connection as the tenant described by `env`
    pub async fn connect_as_tenant(
        &self,
        env: &ConnectionEnvResponse,
    ) -> Result<PgConnection, sqlx::Error> {
        PgConnection::connect_with(&self.tenant_options(env)).await
    }

    /// Number of non-system roles on the server
    pub async fn role_count(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pg_roles WHERE rolname NOT LIKE 'pg\\_%'")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count roles")
    }

    /// Whether a role with the given name exists
    pub async fn role_exists(&self, role: &str) -> bool {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM pg_roles WHERE rolname = $1)")
            .bind(role)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to look up role")
    }

    /// Whether a database with the given name exists
    pub async fn database_exists(&self, database: &str) -> bool {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)",
        )
        .bind(database)
        .fetch_one(&self.pool)
        .await
        .expect("Failed to look up database")
    }
}

/// Router backed by an admin pool whose server cannot be reached
pub fn unreachable_router() -> Router {
    let options = PgConnectOptions::new()
        .host("127.0.0.1")
        .port(1)
        .username("postgres")
        .password("postgres");
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy_with(options);

    let settings = ProvisioningSettings {
        admin_role: ADMIN_ROLE.to_string(),
        host: "127.0.0.1".to_string(),
        system_database: "postgres".to_string(),
    };
    router(AppState::new(Arc::new(PostgresDatabaseAdmin::new(pool)), settings))
}

pub fn create_request() -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/databases")
        .body(Body::empty())
        .expect("Failed to build request")
}

pub fn drop_request(id: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(format!("/databases?id={id}"))
        .body(Body::empty())
        .expect("Failed to build request")
}

pub fn ping_request() -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri("/ping")
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Create response structure for deserialization
#[derive(Debug, Deserialize)]
pub struct ProvisionedDatabaseResponse {
    pub id: String,
    pub env: ConnectionEnvResponse,
}

#[derive(Debug, Deserialize)]
pub struct ConnectionEnvResponse {
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

/// Error response structure for deserialization
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub request_id: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
