// src/lib.rs
// MovieHub - Client-side movie catalog sync core
//
// Architecture:
// - Domain-centric: entities and result states live in `domain`
// - Two data sources: remote catalog API (authoritative for catalog data)
//   and local SQLite store (authoritative for the watchlist)
// - One coordinator (`MovieService`) owns every observable query slot
// - Explicit: no implicit behavior, no lazy globals

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{Movie, QueryKey, ResultState};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{SqliteWatchlistRepository, WatchlistRepository};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{MovieService, WatchlistStore};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppConfig, AppState};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{MovieListPayload, MoviePayload, MovieRemoteDataSource, TmdbClient};
