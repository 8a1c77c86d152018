//! REST API Module
//!
//! Contains HTTP handlers, DTOs, and middleware for the REST API.

pub mod dto;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::application::use_cases::databases::{
    CreateDatabaseUseCase, DropDatabaseUseCase, PingUseCase,
};
use crate::domain::gateways::DatabaseAdmin;
use crate::domain::models::tenant_database::ProvisioningSettings;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub create_database_use_case: Arc<CreateDatabaseUseCase>,
    pub drop_database_use_case: Arc<DropDatabaseUseCase>,
    pub ping_use_case: Arc<PingUseCase>,
}

impl AppState {
    /// Wire every use case to the same admin gateway
    #[must_use]
    pub fn new(database_admin: Arc<dyn DatabaseAdmin>, settings: ProvisioningSettings) -> Self {
        Self {
            create_database_use_case: Arc::new(CreateDatabaseUseCase::new(
                database_admin.clone(),
                settings,
            )),
            drop_database_use_case: Arc::new(DropDatabaseUseCase::new(database_admin.clone())),
            ping_use_case: Arc::new(PingUseCase::new(database_admin)),
        }
    }
}

/// Build the application router with tracing and request IDs
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::databases::router())
        .merge(handlers::health::router())
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .with_state(state)
}
