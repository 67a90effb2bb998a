use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use movie_browser::app;
use movie_browser::config::settings::AppConfig;
use movie_browser::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting server...");

    let config = AppConfig::new().context("invalid configuration")?;
    let port = config.server_port;
    let state = AppState::from_config(&config)?;

    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}
