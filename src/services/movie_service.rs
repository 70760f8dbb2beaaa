// src/services/movie_service.rs
//
// Repository coordinator - the single owner of every query slot.
//
// CRITICAL RULES:
// - Only this service transitions slot state; subscribers are read-only
// - One remote call per invocation, no retry, no deduplication
// - A superseded request's completion is discarded, never republished
// - Watchlist writes go to the local store only; the watchlist stream
//   updates because it is sourced live from storage

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::domain::{Movie, QueryKey, ResultState};
use crate::error::AppResult;
use crate::integrations::tmdb::{MovieListPayload, MovieRemoteDataSource};
use crate::services::slots::Slot;
use crate::services::watchlist_store::WatchlistStore;

/// Coordinates the remote catalog gateway and the local watchlist store,
/// exposing each logical query as a watch stream of `ResultState` values.
///
/// All consumers must share one instance (via the application context) so
/// they observe the same slots. Fetch operations spawn onto the ambient
/// Tokio runtime; dropping a receiver never cancels the underlying call.
pub struct MovieService {
    remote: Arc<dyn MovieRemoteDataSource>,
    store: Arc<WatchlistStore>,
    list_slots: Mutex<HashMap<QueryKey, Arc<Slot<Vec<Movie>>>>>,
    detail_slots: Mutex<HashMap<i64, Arc<Slot<Movie>>>>,
    watchlist_tx: Arc<watch::Sender<ResultState<Vec<Movie>>>>,
    watchlist_wired: Mutex<bool>,
}

impl MovieService {
    pub fn new(remote: Arc<dyn MovieRemoteDataSource>, store: Arc<WatchlistStore>) -> Self {
        let (watchlist_tx, _) = watch::channel(ResultState::Loading);
        Self {
            remote,
            store,
            list_slots: Mutex::new(HashMap::new()),
            detail_slots: Mutex::new(HashMap::new()),
            watchlist_tx: Arc::new(watchlist_tx),
            watchlist_wired: Mutex::new(false),
        }
    }

    // ========================================================================
    // Catalog queries (remote-sourced)
    // ========================================================================

    pub fn top_rated(&self, api_key: &str) -> watch::Receiver<ResultState<Vec<Movie>>> {
        let remote = Arc::clone(&self.remote);
        let api_key = api_key.to_owned();
        self.fetch_list(QueryKey::TopRated, async move {
            remote.get_top_rated(&api_key).await
        })
    }

    pub fn now_playing(&self, api_key: &str) -> watch::Receiver<ResultState<Vec<Movie>>> {
        let remote = Arc::clone(&self.remote);
        let api_key = api_key.to_owned();
        self.fetch_list(QueryKey::NowPlaying, async move {
            remote.get_now_playing(&api_key).await
        })
    }

    pub fn recommendations(
        &self,
        movie_id: i64,
        api_key: &str,
    ) -> watch::Receiver<ResultState<Vec<Movie>>> {
        let remote = Arc::clone(&self.remote);
        let api_key = api_key.to_owned();
        self.fetch_list(QueryKey::Recommendations(movie_id), async move {
            remote.get_recommendations(movie_id, &api_key).await
        })
    }

    /// Search the catalog. The query is forwarded to the gateway unchanged,
    /// empty strings included; validation is a presentation concern.
    pub fn search(&self, api_key: &str, query: &str) -> watch::Receiver<ResultState<Vec<Movie>>> {
        let remote = Arc::clone(&self.remote);
        let api_key = api_key.to_owned();
        let owned_query = query.to_owned();
        self.fetch_list(QueryKey::Search(query.to_owned()), async move {
            remote.search(&api_key, &owned_query).await
        })
    }

    pub fn detail(&self, movie_id: i64, api_key: &str) -> watch::Receiver<ResultState<Movie>> {
        let slot = self.detail_slot(movie_id);
        let seq = slot.begin();

        let remote = Arc::clone(&self.remote);
        let api_key = api_key.to_owned();
        let task_slot = Arc::clone(&slot);
        tokio::spawn(async move {
            let state = match remote.get_detail(movie_id, &api_key).await {
                Ok(payload) => ResultState::Success(Movie::from(payload)),
                Err(e) => {
                    log::warn!("{}: remote fetch failed: {}", task_slot.key(), e);
                    ResultState::Error
                }
            };
            task_slot.complete(seq, state);
        });

        slot.subscribe()
    }

    // ========================================================================
    // Watchlist (local-store-sourced)
    // ========================================================================

    /// Live watchlist content, remapped from the store's row view on every
    /// underlying change. A failed initial read publishes `Error`; the next
    /// call retries the wiring.
    pub fn watchlist(&self) -> watch::Receiver<ResultState<Vec<Movie>>> {
        self.ensure_watchlist_wired();
        self.watchlist_tx.subscribe()
    }

    /// Live membership flag, straight from the local store. No mapping.
    pub fn is_in_watchlist(&self, movie_id: i64) -> watch::Receiver<bool> {
        self.store.observe_is_member(movie_id)
    }

    /// Persist a movie to the watchlist. Completes when the store write
    /// completes; the live views update reactively.
    pub async fn add_to_watchlist(&self, movie: &Movie) -> AppResult<()> {
        self.store.insert(movie)
    }

    /// Remove a movie from the watchlist by id.
    pub async fn remove_from_watchlist(&self, movie_id: i64) -> AppResult<()> {
        self.store.delete(movie_id)
    }

    // ========================================================================
    // INTERNAL: slot management and request lifecycle
    // ========================================================================

    fn list_slot(&self, key: QueryKey) -> Arc<Slot<Vec<Movie>>> {
        let mut slots = self.list_slots.lock().unwrap();
        Arc::clone(
            slots
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Slot::new(key))),
        )
    }

    fn detail_slot(&self, movie_id: i64) -> Arc<Slot<Movie>> {
        let mut slots = self.detail_slots.lock().unwrap();
        Arc::clone(
            slots
                .entry(movie_id)
                .or_insert_with(|| Arc::new(Slot::new(QueryKey::Detail(movie_id)))),
        )
    }

    /// Run one list request against its slot: publish `Loading`, issue the
    /// call, publish the mapped terminal state through the sequence gate.
    fn fetch_list<F>(
        &self,
        key: QueryKey,
        request: F,
    ) -> watch::Receiver<ResultState<Vec<Movie>>>
    where
        F: Future<Output = AppResult<MovieListPayload>> + Send + 'static,
    {
        let slot = self.list_slot(key);
        let seq = slot.begin();

        let task_slot = Arc::clone(&slot);
        tokio::spawn(async move {
            let state = match request.await {
                Ok(payload) => ResultState::Success(payload.into_movies()),
                Err(e) => {
                    log::warn!("{}: remote fetch failed: {}", task_slot.key(), e);
                    ResultState::Error
                }
            };
            task_slot.complete(seq, state);
        });

        slot.subscribe()
    }

    /// Wire the store's live row view into the watchlist stream, once.
    fn ensure_watchlist_wired(&self) {
        let mut wired = self.watchlist_wired.lock().unwrap();
        if *wired {
            return;
        }

        match self.store.observe_rows() {
            Ok(mut rows_rx) => {
                let snapshot = rows_rx.borrow_and_update().clone();
                self.watchlist_tx.send_replace(ResultState::Success(snapshot));

                let tx = Arc::clone(&self.watchlist_tx);
                tokio::spawn(async move {
                    while rows_rx.changed().await.is_ok() {
                        let rows = rows_rx.borrow_and_update().clone();
                        tx.send_replace(ResultState::Success(rows));
                    }
                });
                *wired = true;
            }
            Err(e) => {
                // Stay unwired so a later call retries the read.
                log::warn!("{}: store read failed: {}", QueryKey::Watchlist, e);
                self.watchlist_tx.send_replace(ResultState::Error);
            }
        }
    }
}
