// src/domain/query_key.rs

use std::fmt;

/// Identifies which logical slot a result belongs to.
///
/// Parameterized variants address distinct slots: recommendations for two
/// different movies, or two different search strings, never share state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    TopRated,
    NowPlaying,
    Recommendations(i64),
    Detail(i64),
    Search(String),
    Watchlist,
    WatchlistMembership(i64),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::TopRated => write!(f, "top_rated"),
            QueryKey::NowPlaying => write!(f, "now_playing"),
            QueryKey::Recommendations(movie_id) => write!(f, "recommendations({})", movie_id),
            QueryKey::Detail(movie_id) => write!(f, "detail({})", movie_id),
            QueryKey::Search(query) => write!(f, "search({:?})", query),
            QueryKey::Watchlist => write!(f, "watchlist"),
            QueryKey::WatchlistMembership(movie_id) => {
                write!(f, "watchlist_membership({})", movie_id)
            }
        }
    }
}
