use std::sync::Arc;

use anyhow::Context;

use levelscreener::business_logic::config::LevelsConfig;
use levelscreener::config::ServerConfig;
use levelscreener::logging;
use levelscreener::router;
use levelscreener::services::hyperliquid::HyperliquidClient;
use levelscreener::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;
    let _log_guard = logging::init_logging(config.log_dir.as_deref());

    let state = AppState {
        hyperliquid: Arc::new(HyperliquidClient::with_url(config.hyperliquid_url.clone())),
        levels_config: LevelsConfig::default(),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Server running on http://{}", config.bind_addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui", config.bind_addr);

    axum::serve(listener, router(state))
        .await
        .context("server error")?;
    Ok(())
}
