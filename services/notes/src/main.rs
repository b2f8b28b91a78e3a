use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod export;
mod models;
mod repositories;
mod routes;
mod state;

use common::{
    config::ServerConfig,
    database::{DatabaseConfig, health_check, init_pool},
};

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting notes service");

    let server_config = ServerConfig::from_env("NOTES")?;

    // Initialize the document store
    let db_config = DatabaseConfig::from_env("knowledgebase")?;
    let database = init_pool(&db_config).await?;

    if health_check(&database).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    database
        .ensure_collections(&repositories::COLLECTIONS)
        .await?;

    let address = server_config.bind_address();
    info!("Exports are written to {}", server_config.export_dir);
    let app_state = AppState::new(database, server_config.export_dir)?
        .with_max_upload_bytes(server_config.max_upload_bytes);
    info!("Notes service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Notes service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
