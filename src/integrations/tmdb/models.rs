// src/integrations/tmdb/models.rs
//
// Wire-format records from the catalog API.
//
// Mapping into the domain entity is TOTAL: every descriptive field is
// optional and degrades to a default, an absent results list maps to an
// empty Vec. A record that cannot be mapped does not exist in this design.

use serde::Deserialize;

use crate::domain::Movie;

/// One movie record as returned by the remote API.
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePayload {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// A paged list response.
///
/// `results` is absent on some degraded responses; downstream that maps to
/// an empty list, never a null.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieListPayload {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub results: Option<Vec<MoviePayload>>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_results: Option<u32>,
}

impl From<MoviePayload> for Movie {
    fn from(payload: MoviePayload) -> Self {
        Movie {
            id: payload.id,
            title: payload.title.unwrap_or_default(),
            overview: payload.overview,
            poster_path: payload.poster_path,
            vote_average: payload.vote_average,
            release_date: payload.release_date,
        }
    }
}

impl MovieListPayload {
    /// Map the page element-wise into domain entities.
    pub fn into_movies(self) -> Vec<Movie> {
        self.results
            .unwrap_or_default()
            .into_iter()
            .map(Movie::from)
            .collect()
    }
}
