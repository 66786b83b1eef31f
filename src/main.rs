use std::sync::Arc;

use reelscout_api::{
    config::Config,
    routes::{create_router, AppState},
    services::providers::TmdbProvider,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reelscout_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let provider = TmdbProvider::new(
        config.tmdb_api_token.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_image_url.clone(),
        config.fetch_timeout(),
    )?;

    let state = Arc::new(AppState::new(Arc::new(provider), config.search_config()));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
