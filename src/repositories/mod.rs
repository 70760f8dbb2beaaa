// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only

pub mod watchlist_repository;

pub use watchlist_repository::{SqliteWatchlistRepository, WatchlistRepository};
