use season_recommender::{
    api::{create_router, AppState},
    config::Config,
    services::Catalog,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("season_recommender=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Both tables must load before anything is served
    let catalog = Catalog::load(&config).map_err(|e| {
        tracing::error!(error = %e, "Failed to load dataset");
        e
    })?;

    let app = create_router(AppState::new(catalog));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
