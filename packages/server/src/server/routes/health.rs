use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    app: String,
    version: String,
    environment: String,
    database: String,
}

#[derive(Serialize)]
pub struct RootResponse {
    message: String,
    version: String,
    docs: String,
}

/// Health check endpoint
///
/// Returns 200 OK when the database answers `SELECT 1` within 5s,
/// 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = match tokio::time::timeout(
        std::time::Duration::from_secs(5),
        sqlx::query("SELECT 1").execute(&state.deps.db_pool),
    )
    .await
    {
        Ok(Ok(_)) => "connected".to_string(),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Health check query failed");
            "error".to_string()
        }
        Err(_) => {
            tracing::warn!("Health check query timed out");
            "timeout".to_string()
        }
    };

    let is_healthy = database == "connected";
    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if is_healthy { "healthy" } else { "unhealthy" }.to_string(),
            app: state.app_name.clone(),
            version: state.version.clone(),
            environment: state.environment.clone(),
            database,
        }),
    )
}

pub async fn root_handler(Extension(state): Extension<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("{} API", state.app_name),
        version: state.version.clone(),
        docs: "/docs".to_string(),
    })
}
