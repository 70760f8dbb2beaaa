// src/repositories/watchlist_repository.rs

use chrono::Utc;
use rusqlite::{params, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::Movie;
use crate::error::{AppError, AppResult};

pub trait WatchlistRepository: Send + Sync {
    fn save(&self, movie: &Movie) -> AppResult<()>;
    fn delete(&self, movie_id: i64) -> AppResult<()>;
    fn get_by_id(&self, movie_id: i64) -> AppResult<Option<Movie>>;
    fn list_all(&self) -> AppResult<Vec<Movie>>;
    fn exists(&self, movie_id: i64) -> AppResult<bool>;
}

pub struct SqliteWatchlistRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteWatchlistRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Movie - returns rusqlite::Error for query_map
    /// compatibility. Total over valid rows: every descriptive column is
    /// nullable and degrades to None.
    fn row_to_movie(row: &Row) -> Result<Movie, rusqlite::Error> {
        Ok(Movie {
            id: row.get("movie_id")?,
            title: row.get("title")?,
            overview: row.get("overview")?,
            poster_path: row.get("poster_path")?,
            vote_average: row.get("vote_average")?,
            release_date: row.get("release_date")?,
        })
    }
}

impl WatchlistRepository for SqliteWatchlistRepository {
    fn save(&self, movie: &Movie) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO watchlist (
                movie_id, title, overview, poster_path, vote_average, release_date, added_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                movie.id,
                movie.title,
                movie.overview,
                movie.poster_path,
                movie.vote_average,
                movie.release_date,
                Utc::now().to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn delete(&self, movie_id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM watchlist WHERE movie_id = ?1", params![movie_id])?;
        Ok(())
    }

    fn get_by_id(&self, movie_id: i64) -> AppResult<Option<Movie>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM watchlist WHERE movie_id = ?1")?;

        match stmt.query_row(params![movie_id], Self::row_to_movie) {
            Ok(movie) => Ok(Some(movie)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Movie>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT * FROM watchlist ORDER BY added_at DESC, movie_id")?;

        let movies: Vec<Movie> = stmt
            .query_map([], Self::row_to_movie)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(movies)
    }

    fn exists(&self, movie_id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM watchlist WHERE movie_id = ?1)",
            params![movie_id],
            |row| row.get(0),
        )?;

        Ok(exists)
    }
}
