// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod movie_service;
pub mod slots;
pub mod watchlist_store;

#[cfg(test)]
mod movie_service_tests;

// Re-export the coordination surface
pub use movie_service::MovieService;
pub use slots::Slot;
pub use watchlist_store::WatchlistStore;
