use std::sync::Arc;

use totem_board::board::Board;
use totem_board::catalog::{CacheConfig, CachedCatalog, Catalog, CatalogClient, MockCatalog};
use totem_board::config::AppConfig;
use totem_board::favorites::FavoritesStore;
use totem_board::storage::{FileStorage, StorageHost};
use totem_board::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("totem_board=info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    match config.mock_network.clone() {
        Some(path) => {
            info!(path = %path.display(), "using mock network");
            let catalog = MockCatalog::from_file(&path).expect("Failed to load mock network");
            serve(config.clone(), catalog).await;
        }
        None => {
            info!(url = %config.catalog.base_url, "using catalog API");
            let client = CatalogClient::new(config.catalog.clone())
                .expect("Failed to create catalog client");
            let catalog = CachedCatalog::new(client, &CacheConfig::default());
            serve(config, catalog).await;
        }
    }
}

async fn serve<C: Catalog>(config: AppConfig, catalog: C) {
    let storage: StorageHost = Arc::new(FileStorage::new(config.data_dir.clone()));
    let favorites = FavoritesStore::load(Some(storage));
    info!(count = favorites.len(), dir = %config.data_dir.display(), "loaded favorites");

    let board = Board::new(Arc::new(catalog), favorites, config.poll_interval);
    let state = AppState::new(board, config.poll_interval);

    // Serve right away; the page shows the catalog loading
    let loader = state.board.clone();
    tokio::spawn(async move {
        if Board::load_shared(&loader).await.is_err() {
            warn!("catalog unavailable, waiting for a retry from the page");
        }
    });

    let app = create_router(state.clone(), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .expect("Failed to bind listen address");
    info!("Totem board listening on http://{}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    state.board.lock().await.shutdown().await;
    info!("stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}
