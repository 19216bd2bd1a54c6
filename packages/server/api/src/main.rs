use anyhow::Context;
use dotenv::dotenv;
use trending_api::config::Config;
use trending_api::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load Config
    let config = Config::from_env()?;
    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set, searches use the unauthenticated rate limit");
    }
    let addr = config.bind_addr;

    let app_state = AppState::new(config).context("Failed to build GitHub client")?;
    let app = trending_api::app(app_state)?;

    // Start Server
    tracing::info!("Trending API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
