// src/domain/movie.rs

use serde::{Deserialize, Serialize};

/// A single movie, as seen by the rest of the application.
///
/// Identity is the catalog id, stable across the remote API and the local
/// watchlist. Instances are constructed fresh on every mapping from a wire
/// payload or storage row and never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Stable catalog identifier
    pub id: i64,

    /// Display title; empty when the source omitted it
    pub title: String,

    /// Synopsis, when the source provides one
    pub overview: Option<String>,

    /// Relative poster path. Joining it with the image base URL is a
    /// presentation concern; the path is carried unchanged.
    pub poster_path: Option<String>,

    /// Average user rating on the 0-10 scale
    pub vote_average: Option<f64>,

    /// Release date as the wire string (YYYY-MM-DD), carried opaquely
    pub release_date: Option<String>,
}
