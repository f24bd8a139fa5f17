//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, MemoryUserStore};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Command-line flags win over the environment
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if let Some(age_requirement) = args.age_requirement {
        config.age_requirement = age_requirement;
    }
    tracing::info!(age_requirement = config.age_requirement, "Age requirement set");

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let app_state = if args.in_memory {
        tracing::warn!("Using in-memory storage, users are lost on shutdown");
        AppState::with_repository(Arc::new(MemoryUserStore::new()), clock, config.age_requirement)
    } else {
        let db = Database::connect(&config)
            .await
            .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
        tracing::info!("Database connected");
        AppState::from_config(Arc::new(db), clock, &config)
    };

    // Build router
    let app = create_router(app_state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
