// src/integrations/tmdb/client.rs
//
// TMDB API Integration
//
// ARCHITECTURE:
// - REST client for the TMDB v3 API
// - One network call per logical query, single attempt, no retry
// - Maps external data -> wire DTOs (NO domain mutation)
// - Used by MovieService through the MovieRemoteDataSource trait
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never creates or modifies domain entities directly
// - Returns DTOs that the coordinator maps
// - Handles all external API concerns

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::models::{MovieListPayload, MoviePayload};
use crate::error::{AppError, AppResult};

/// Production TMDB endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Remote catalog gateway.
///
/// Each call is single-shot and asynchronous, completing exactly once with
/// either a typed payload or an `AppError` (transport failure, non-2xx
/// status, or undecodable body). Implementations must be shareable across
/// tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRemoteDataSource: Send + Sync {
    async fn get_top_rated(&self, api_key: &str) -> AppResult<MovieListPayload>;
    async fn get_now_playing(&self, api_key: &str) -> AppResult<MovieListPayload>;
    async fn get_recommendations(
        &self,
        movie_id: i64,
        api_key: &str,
    ) -> AppResult<MovieListPayload>;
    async fn get_detail(&self, movie_id: i64, api_key: &str) -> AppResult<MoviePayload>;
    async fn search(&self, api_key: &str, query: &str) -> AppResult<MovieListPayload>;
}

/// TMDB API Client
pub struct TmdbClient {
    base_url: String,
    http_client: Client,
}

impl TmdbClient {
    /// Create a new client against the production endpoint
    pub fn new() -> Self {
        Self::with_config(DEFAULT_BASE_URL, Duration::from_secs(30))
    }

    /// Create a client with an explicit endpoint and timeout
    ///
    /// The endpoint override exists for tests and self-hosted proxies.
    pub fn with_config(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            http_client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue one GET request and decode the body.
    ///
    /// Transport failures surface as `AppError::Http`, non-2xx responses as
    /// `AppError::Api`, undecodable bodies as `AppError::Decode`.
    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http_client
            .get(self.url(path))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api {
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MovieRemoteDataSource for TmdbClient {
    async fn get_top_rated(&self, api_key: &str) -> AppResult<MovieListPayload> {
        self.get_json("/movie/top_rated", &[("api_key", api_key)])
            .await
    }

    async fn get_now_playing(&self, api_key: &str) -> AppResult<MovieListPayload> {
        self.get_json("/movie/now_playing", &[("api_key", api_key)])
            .await
    }

    async fn get_recommendations(
        &self,
        movie_id: i64,
        api_key: &str,
    ) -> AppResult<MovieListPayload> {
        self.get_json(
            &format!("/movie/{}/recommendations", movie_id),
            &[("api_key", api_key)],
        )
        .await
    }

    async fn get_detail(&self, movie_id: i64, api_key: &str) -> AppResult<MoviePayload> {
        self.get_json(&format!("/movie/{}", movie_id), &[("api_key", api_key)])
            .await
    }

    async fn search(&self, api_key: &str, query: &str) -> AppResult<MovieListPayload> {
        // The query goes to the wire unchanged, empty strings included;
        // input validation is a presentation concern.
        self.get_json("/search/movie", &[("api_key", api_key), ("query", query)])
            .await
    }
}

impl Default for TmdbClient {
    fn default() -> Self {
        Self::new()
    }
}
