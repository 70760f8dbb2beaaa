// src/application/state.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::db::{create_connection_pool, get_database_path, initialize_database};
use crate::error::AppResult;
use crate::integrations::tmdb::{MovieRemoteDataSource, TmdbClient, DEFAULT_BASE_URL};
use crate::repositories::{SqliteWatchlistRepository, WatchlistRepository};
use crate::services::{MovieService, WatchlistStore};

/// Application-wide configuration.
///
/// Plain data with sensible defaults; build one at startup and hand it to
/// `AppState::initialize`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file. `None` resolves the platform data directory.
    pub database_path: Option<PathBuf>,
    /// Remote catalog base URL. Overridable for tests and proxies.
    pub api_base_url: String,
    /// HTTP client timeout.
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(30),
        }
    }
}

/// Application context: every long-lived collaborator, constructed exactly
/// once at startup and shared by reference.
///
/// All consumers clone the returned `Arc` and therefore observe the same
/// coordinator slots. There is no lazily-initialized global; the context
/// itself is the single instance.
pub struct AppState {
    pub movie_service: Arc<MovieService>,
}

impl AppState {
    /// Build the full object graph: pool, schema, repositories, store,
    /// remote client, coordinator.
    ///
    /// Call once from the composition root, inside the async runtime (the
    /// coordinator spawns its request tasks onto it).
    pub fn initialize(config: &AppConfig) -> AppResult<Arc<Self>> {
        // 1. INFRASTRUCTURE
        let db_path = match &config.database_path {
            Some(path) => path.clone(),
            None => get_database_path()?,
        };
        let pool = Arc::new(create_connection_pool(&db_path)?);

        // Initialize schema (idempotent)
        {
            let conn = pool.get()?;
            initialize_database(&conn)?;
        }

        // 2. REPOSITORIES
        let watchlist_repo: Arc<dyn WatchlistRepository> =
            Arc::new(SqliteWatchlistRepository::new(Arc::clone(&pool)));

        // 3. GATEWAYS
        let store = Arc::new(WatchlistStore::new(watchlist_repo));
        let remote: Arc<dyn MovieRemoteDataSource> = Arc::new(TmdbClient::with_config(
            config.api_base_url.clone(),
            config.http_timeout,
        ));

        // 4. COORDINATOR
        let movie_service = Arc::new(MovieService::new(remote, store));

        Ok(Arc::new(Self { movie_service }))
    }
}
