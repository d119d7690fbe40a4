use std::net::SocketAddr;
use anyhow::Context;
use shop_api::{app, AppState};
use shop_store::CatalogFixture;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shop_api=debug,shop_core=debug,shop_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = shop_store::app_config::Config::load().context("Failed to load config")?;
    tracing::info!("Starting shop API on port {}", config.server.port);

    let fixture = CatalogFixture::from_path(&config.catalog.fixture_path)
        .with_context(|| format!("Failed to load catalog from {}", config.catalog.fixture_path))?;
    let loaded = fixture.load().await;

    let state = AppState::from_catalog(loaded, config.listing.clone(), config.catalog.default_channel.clone());
    if !state.channels.contains_key(&state.default_channel) {
        anyhow::bail!("Default channel {} is not part of the catalog", state.default_channel);
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
