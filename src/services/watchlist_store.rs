// src/services/watchlist_store.rs
//
// Live view over the persisted watchlist.
//
// The repository below this stays a dumb row mapper; this wrapper owns the
// push side: one channel carrying the full current row set, and one boolean
// channel per movie id for membership. Writes go through the repository and
// republish both views, which is what keeps the coordinator's watchlist
// stream reactive without it ever touching a slot.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::domain::Movie;
use crate::error::AppResult;
use crate::repositories::WatchlistRepository;

pub struct WatchlistStore {
    repo: Arc<dyn WatchlistRepository>,
    rows_tx: watch::Sender<Vec<Movie>>,
    membership: Mutex<HashMap<i64, watch::Sender<bool>>>,
}

impl WatchlistStore {
    pub fn new(repo: Arc<dyn WatchlistRepository>) -> Self {
        let (rows_tx, _) = watch::channel(Vec::new());
        Self {
            repo,
            rows_tx,
            membership: Mutex::new(HashMap::new()),
        }
    }

    /// Re-read the stored rows and push the snapshot to subscribers.
    pub fn refresh(&self) -> AppResult<()> {
        let rows = self.repo.list_all()?;
        self.rows_tx.send_replace(rows);
        Ok(())
    }

    /// Live sequence of the stored rows.
    ///
    /// The receiver's current value is the snapshot as of this call; every
    /// subsequent write republishes. A failed initial read surfaces to the
    /// caller instead of poisoning the channel.
    pub fn observe_rows(&self) -> AppResult<watch::Receiver<Vec<Movie>>> {
        self.refresh()?;
        Ok(self.rows_tx.subscribe())
    }

    /// Live membership flag for one movie id.
    ///
    /// The channel is created on first observation, seeded from storage;
    /// a failed seed read degrades to `false` and is logged.
    pub fn observe_is_member(&self, movie_id: i64) -> watch::Receiver<bool> {
        let mut membership = self.membership.lock().unwrap();
        membership
            .entry(movie_id)
            .or_insert_with(|| {
                let current = self.repo.exists(movie_id).unwrap_or_else(|e| {
                    log::warn!("membership read failed for movie {}: {}", movie_id, e);
                    false
                });
                watch::channel(current).0
            })
            .subscribe()
    }

    /// Persist a movie and republish both live views.
    pub fn insert(&self, movie: &Movie) -> AppResult<()> {
        self.repo.save(movie)?;
        self.publish_membership(movie.id, true);
        self.refresh()
    }

    /// Remove a movie by id and republish both live views.
    pub fn delete(&self, movie_id: i64) -> AppResult<()> {
        self.repo.delete(movie_id)?;
        self.publish_membership(movie_id, false);
        self.refresh()
    }

    fn publish_membership(&self, movie_id: i64, member: bool) {
        let membership = self.membership.lock().unwrap();
        if let Some(tx) = membership.get(&movie_id) {
            tx.send_replace(member);
        }
    }
}
