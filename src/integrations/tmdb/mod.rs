// src/integrations/tmdb/mod.rs

pub mod client;
pub mod models;

pub use client::{MovieRemoteDataSource, TmdbClient, DEFAULT_BASE_URL};
pub use models::{MovieListPayload, MoviePayload};

#[cfg(test)]
pub use client::MockMovieRemoteDataSource;
