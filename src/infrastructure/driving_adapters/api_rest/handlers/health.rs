//! Health Handlers

use axum::{extract::State, http::StatusCode, routing::get, Router};

use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Create the router for health endpoints
pub fn router() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}

/// GET /ping - Check the admin connection pool
///
/// # Responses
///
/// * 200 OK - The admin connection can serve queries
/// * 500 Internal Server Error - The admin connection failed
#[axum::debug_handler]
async fn ping(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.ping_use_case.execute().await?;

    Ok(StatusCode::OK)
}
