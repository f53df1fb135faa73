use anyhow::{Context, Result};
use log::LevelFilter;

use matsel_server::config::ServerConfig;
use matsel_server::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MATSEL_LOG", "error,matsel=info"))
        .init();

    let config = ServerConfig::from_env()?;
    log::info!("Resolving model bundle at {}", config.model_path.display());

    let state = match AppState::load(&config.model_path) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to load model bundle: {}", e);
            std::process::exit(1)
        }
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    log::info!("Serving predictions on http://{}", config.bind_addr);

    axum::serve(listener, router(state))
        .await
        .context("HTTP server terminated")?;
    Ok(())
}
