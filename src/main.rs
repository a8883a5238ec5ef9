use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use storefront_api::{
    api::{create_router, AppState},
    config::Config,
    services::MemoryCatalog,
};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("storefront_api=info,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_logging();

    // Seed the catalog once; it is read-only from here on
    let catalog = Arc::new(MemoryCatalog::seeded()?);
    let state = AppState::new(catalog, config.recommendation_seed);

    let mut app = create_router(state);
    if config.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Storefront API listening");

    axum::serve(listener, app).await?;
    Ok(())
}
