//! Database Handlers
//!
//! HTTP handlers for provisioning and deprovisioning tenant databases.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::post,
    Form, Json, Router,
};

use crate::infrastructure::driving_adapters::api_rest::dto::database::{
    DropDatabaseParams, ProvisionedDatabaseResponseDto,
};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::{ApiError, DomainError};

/// Create the router for database endpoints
pub fn router() -> Router<AppState> {
    Router::new().route("/databases", post(create_database).delete(drop_database))
}

/// POST /databases - Provision a new database and owning role
///
/// # Responses
///
/// * 200 OK - Identifier and connection env of the new database
/// * 500 Internal Server Error - A provisioning statement failed
#[axum::debug_handler]
async fn create_database(
    State(state): State<AppState>,
) -> Result<Json<ProvisionedDatabaseResponseDto>, ApiError> {
    let provisioned = state.create_database_use_case.execute().await?;

    Ok(Json(ProvisionedDatabaseResponseDto::from(provisioned)))
}

/// DELETE /databases - Drop a database and its owning role
///
/// The `id` is read from an urlencoded form body, falling back to the query
/// string.
///
/// # Responses
///
/// * 200 OK - Database and role dropped
/// * 400 Bad Request - Missing or malformed `id`
/// * 500 Internal Server Error - A deprovisioning statement failed
#[axum::debug_handler]
async fn drop_database(
    State(state): State<AppState>,
    query: Result<Query<DropDatabaseParams>, QueryRejection>,
    form: Option<Form<DropDatabaseParams>>,
) -> Result<StatusCode, ApiError> {
    let Query(query) =
        query.map_err(|rejection| DomainError::InvalidTenantId(rejection.body_text()))?;

    let id = form
        .and_then(|Form(params)| params.id)
        .or(query.id)
        .unwrap_or_default();

    state.drop_database_use_case.execute(&id).await?;

    Ok(StatusCode::OK)
}
