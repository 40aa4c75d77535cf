//! Health check handler

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::Envelope;

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_i64)]
    pub timestamp_ms: i64,
    /// `postgres` or `memory`
    #[schema(example = "postgres")]
    pub storage: &'static str,
    /// Commit the binary was built from
    #[schema(example = "3f2a9c1")]
    pub revision: &'static str,
}

/// Health check endpoint
///
/// Pings PostgreSQL when configured. Does not expose failure details.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = Envelope<HealthResponse>),
        (status = 503, description = "Service unavailable")
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<HealthResponse>>, StatusCode> {
    let storage = match state.pg_db {
        Some(ref db) => {
            if let Err(e) = db.health_check().await {
                tracing::error!("[HEALTH] PostgreSQL ping failed: {}", e);
                return Err(StatusCode::SERVICE_UNAVAILABLE);
            }
            "postgres"
        }
        None => "memory",
    };

    Ok(Json(Envelope::new(HealthResponse {
        timestamp_ms: Utc::now().timestamp_millis(),
        storage,
        revision: env!("BUILD_REVISION"),
    })))
}
