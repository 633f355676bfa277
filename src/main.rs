use cinema_api::{
    api::{create_router, AppState},
    config::Config,
    services::{
        catalog::{EmbeddedCatalog, JsonFileCatalog},
        load_dataset, CatalogProvider,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinema_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Load the catalog once; it stays immutable for the process lifetime
    let provider: Box<dyn CatalogProvider> = match &config.catalog_path {
        Some(path) => Box::new(JsonFileCatalog::new(path)),
        None => Box::new(EmbeddedCatalog),
    };
    let dataset = load_dataset(provider.as_ref()).await?;

    let state = AppState::new(dataset, config.analysis_delay());
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
