pub mod app;
pub mod handlers;

use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::services::Services;

pub async fn start_server(config: &AppConfig) -> Result<()> {
    let services = Services::from_config(config)?;
    let app = app::create_app(services, config.server.cors_origin.as_deref())?;

    let port = config.server.port;
    log_routes(config);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes(config: &AppConfig) {
    info!("Backend: {}", config.backend);
    info!("API Endpoints:");
    info!("  /health                     - Health check");
    info!("  /api/v1/ml/*                - Experiment tracking (models, runs, runsets, executors)");

    #[cfg(feature = "graphql")]
    {
        info!("  /graphql                    - GraphQL API & Playground");
    }
}
