//! Application route configuration.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use sea_orm::DbErr;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::user_routes;
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::USERS_PATH;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(USERS_PATH, user_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServiceStatus {
    /// Status of the database given its ping outcome, `None` when running in memory.
    fn database(ping: Option<Result<(), DbErr>>) -> (bool, Self) {
        match ping {
            None => (
                true,
                Self {
                    status: "in-memory",
                    error: None,
                },
            ),
            Some(Ok(())) => (
                true,
                Self {
                    status: "healthy",
                    error: None,
                },
            ),
            Some(Err(e)) => (
                false,
                Self {
                    status: "unhealthy",
                    error: Some(e.to_string()),
                },
            ),
        }
    }
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let ping = match &state.database {
        Some(database) => Some(database.ping().await),
        None => None,
    };
    let (healthy, db_status) = ServiceStatus::database(ping);

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceHealth {
            database: db_status,
        },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
