use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use calbook_server::config::ServerConfig;
use calbook_server::state::AppState;

const DEFAULT_CONFIG_PATH: &str = "calbook.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config_path = std::env::var("CALBOOK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = ServerConfig::load(&config_path)?;

    tracing::info!(users = config.users.len(), "loaded configuration");

    let state = AppState::new(config.directory());
    let app = calbook_server::app(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("calbook-server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
