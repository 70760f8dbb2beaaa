// src/services/movie_service_tests.rs
//
// COORDINATOR SCENARIO TESTS
//
// PURPOSE:
// - Prove the Loading -> terminal lifecycle for every fetch operation
// - Prove slot isolation across parameterized query keys
// - Prove superseded completions never overwrite fresher results
// - Prove the watchlist views react to local writes without refetching

#[cfg(test)]
mod coordinator_tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    use crate::db::{create_connection_pool, initialize_database, ConnectionPool};
    use crate::domain::{Movie, ResultState};
    use crate::error::{AppError, AppResult};
    use crate::integrations::tmdb::{
        MockMovieRemoteDataSource, MovieListPayload, MoviePayload, MovieRemoteDataSource,
    };
    use crate::repositories::{SqliteWatchlistRepository, WatchlistRepository};
    use crate::services::{MovieService, WatchlistStore};

    fn test_pool() -> (Arc<ConnectionPool>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = Arc::new(create_connection_pool(&dir.path().join("test.db")).unwrap());
        {
            let conn = pool.get().unwrap();
            initialize_database(&conn).unwrap();
        }
        (pool, dir)
    }

    fn service_with_remote(
        remote: Arc<dyn MovieRemoteDataSource>,
    ) -> (MovieService, tempfile::TempDir) {
        let (pool, dir) = test_pool();
        let repo: Arc<dyn WatchlistRepository> = Arc::new(SqliteWatchlistRepository::new(pool));
        let store = Arc::new(WatchlistStore::new(repo));
        (MovieService::new(remote, store), dir)
    }

    fn list_payload(json: &str) -> MovieListPayload {
        serde_json::from_str(json).unwrap()
    }

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: None,
            poster_path: None,
            vote_average: None,
            release_date: None,
        }
    }

    // ------------------------------------------------------------------
    // Fetch lifecycle
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_top_rated_success_publishes_mapped_list() {
        let mut remote = MockMovieRemoteDataSource::new();
        remote
            .expect_get_top_rated()
            .withf(|api_key| api_key == "abc123")
            .returning(|_| Ok(list_payload(r#"{"results": [{"id": 1, "title": "Dune"}]}"#)));
        let (service, _dir) = service_with_remote(Arc::new(remote));

        let mut rx = service.top_rated("abc123");
        assert!(rx.borrow().is_loading());

        rx.changed().await.unwrap();
        let state = rx.borrow().clone();
        assert_eq!(state, ResultState::Success(vec![movie(1, "Dune")]));
    }

    #[tokio::test]
    async fn test_top_rated_transport_failure_publishes_error() {
        let mut remote = MockMovieRemoteDataSource::new();
        remote
            .expect_get_top_rated()
            .returning(|_| Err(AppError::Other("connection timed out".to_string())));
        let (service, _dir) = service_with_remote(Arc::new(remote));

        let mut rx = service.top_rated("abc123");
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_error());
    }

    #[tokio::test]
    async fn test_now_playing_absent_results_maps_to_empty_list() {
        let mut remote = MockMovieRemoteDataSource::new();
        remote
            .expect_get_now_playing()
            .returning(|_| Ok(list_payload("{}")));
        let (service, _dir) = service_with_remote(Arc::new(remote));

        let mut rx = service.now_playing("abc123");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), ResultState::Success(vec![]));
    }

    #[tokio::test]
    async fn test_detail_success_publishes_single_entity() {
        let mut remote = MockMovieRemoteDataSource::new();
        remote
            .expect_get_detail()
            .withf(|movie_id, api_key| *movie_id == 438631 && api_key == "abc123")
            .returning(|_, _| {
                let payload: MoviePayload =
                    serde_json::from_str(r#"{"id": 438631, "title": "Dune"}"#).unwrap();
                Ok(payload)
            });
        let (service, _dir) = service_with_remote(Arc::new(remote));

        let mut rx = service.detail(438631, "abc123");
        assert!(rx.borrow().is_loading());

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), ResultState::Success(movie(438631, "Dune")));
    }

    #[tokio::test]
    async fn test_detail_non_success_response_publishes_error() {
        let mut remote = MockMovieRemoteDataSource::new();
        remote
            .expect_get_detail()
            .returning(|_, _| Err(AppError::Api { status: 404 }));
        let (service, _dir) = service_with_remote(Arc::new(remote));

        let mut rx = service.detail(999, "abc123");
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_error());
    }

    #[tokio::test]
    async fn test_search_forwards_empty_query_unchanged() {
        let mut remote = MockMovieRemoteDataSource::new();
        remote
            .expect_search()
            .withf(|api_key, query| api_key == "abc123" && query.is_empty())
            .times(1)
            .returning(|_, _| Ok(list_payload("{}")));
        let (service, _dir) = service_with_remote(Arc::new(remote));

        let mut rx = service.search("abc123", "");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), ResultState::Success(vec![]));
    }

    // ------------------------------------------------------------------
    // Slot isolation
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_recommendation_slots_are_isolated_per_movie() {
        let mut remote = MockMovieRemoteDataSource::new();
        remote
            .expect_get_recommendations()
            .withf(|movie_id, _| *movie_id == 5)
            .returning(|_, _| Ok(list_payload(r#"{"results": [{"id": 50, "title": "A"}]}"#)));
        remote
            .expect_get_recommendations()
            .withf(|movie_id, _| *movie_id == 7)
            .returning(|_, _| Ok(list_payload(r#"{"results": [{"id": 70, "title": "B"}]}"#)));
        let (service, _dir) = service_with_remote(Arc::new(remote));

        let mut rx5 = service.recommendations(5, "abc123");
        let mut rx7 = service.recommendations(7, "abc123");

        rx5.changed().await.unwrap();
        rx7.changed().await.unwrap();

        assert_eq!(*rx5.borrow(), ResultState::Success(vec![movie(50, "A")]));
        assert_eq!(*rx7.borrow(), ResultState::Success(vec![movie(70, "B")]));
    }

    #[tokio::test]
    async fn test_search_slots_are_isolated_per_query() {
        let mut remote = MockMovieRemoteDataSource::new();
        remote
            .expect_search()
            .withf(|_, query| query == "dune")
            .returning(|_, _| Ok(list_payload(r#"{"results": [{"id": 1, "title": "Dune"}]}"#)));
        remote
            .expect_search()
            .withf(|_, query| query == "arrival")
            .returning(|_, _| {
                Ok(list_payload(r#"{"results": [{"id": 2, "title": "Arrival"}]}"#))
            });
        let (service, _dir) = service_with_remote(Arc::new(remote));

        let mut rx_dune = service.search("abc123", "dune");
        let mut rx_arrival = service.search("abc123", "arrival");

        rx_dune.changed().await.unwrap();
        rx_arrival.changed().await.unwrap();

        assert_eq!(
            *rx_dune.borrow(),
            ResultState::Success(vec![movie(1, "Dune")])
        );
        assert_eq!(
            *rx_arrival.borrow(),
            ResultState::Success(vec![movie(2, "Arrival")])
        );
    }

    // ------------------------------------------------------------------
    // Request sequencing on one slot
    // ------------------------------------------------------------------

    /// Remote fake whose completions are gated on oneshot channels, keyed
    /// by api key so racing requests can be finished in a chosen order.
    struct GatedRemote {
        gates: Mutex<HashMap<String, oneshot::Receiver<AppResult<MovieListPayload>>>>,
    }

    #[async_trait]
    impl MovieRemoteDataSource for GatedRemote {
        async fn get_top_rated(&self, api_key: &str) -> AppResult<MovieListPayload> {
            let gate = self
                .gates
                .lock()
                .unwrap()
                .remove(api_key)
                .expect("no gate queued for this key");
            gate.await.expect("gate sender dropped")
        }

        async fn get_now_playing(&self, _api_key: &str) -> AppResult<MovieListPayload> {
            unimplemented!()
        }

        async fn get_recommendations(
            &self,
            _movie_id: i64,
            _api_key: &str,
        ) -> AppResult<MovieListPayload> {
            unimplemented!()
        }

        async fn get_detail(&self, _movie_id: i64, _api_key: &str) -> AppResult<MoviePayload> {
            unimplemented!()
        }

        async fn search(&self, _api_key: &str, _query: &str) -> AppResult<MovieListPayload> {
            unimplemented!()
        }
    }

    async fn drain_tasks() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    /// Wait past any intermediate `Loading` republished by a racing
    /// request and return the next terminal state.
    async fn wait_terminal(
        rx: &mut tokio::sync::watch::Receiver<ResultState<Vec<Movie>>>,
    ) -> ResultState<Vec<Movie>> {
        loop {
            let current = rx.borrow_and_update().clone();
            if !current.is_loading() {
                return current;
            }
            rx.changed().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_superseded_completion_cannot_overwrite_newer_result() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let remote = GatedRemote {
            gates: Mutex::new(HashMap::from([
                ("first".to_string(), first_rx),
                ("second".to_string(), second_rx),
            ])),
        };
        let (service, _dir) = service_with_remote(Arc::new(remote));

        let mut rx = service.top_rated("first");
        let _superseding = service.top_rated("second");

        // The newer request completes first and wins the slot.
        second_tx
            .send(Ok(list_payload(r#"{"results": [{"id": 2, "title": "B"}]}"#)))
            .unwrap();
        let state = wait_terminal(&mut rx).await;
        assert_eq!(state, ResultState::Success(vec![movie(2, "B")]));

        // The stale completion arrives afterwards and is discarded.
        first_tx
            .send(Ok(list_payload(r#"{"results": [{"id": 1, "title": "A"}]}"#)))
            .unwrap();
        drain_tasks().await;
        assert_eq!(*rx.borrow(), ResultState::Success(vec![movie(2, "B")]));
    }

    #[tokio::test]
    async fn test_slot_waits_for_latest_request_when_stale_finishes_first() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let remote = GatedRemote {
            gates: Mutex::new(HashMap::from([
                ("first".to_string(), first_rx),
                ("second".to_string(), second_rx),
            ])),
        };
        let (service, _dir) = service_with_remote(Arc::new(remote));

        let mut rx = service.top_rated("first");
        let _superseding = service.top_rated("second");

        // The superseded request finishes first; the slot stays Loading.
        first_tx
            .send(Ok(list_payload(r#"{"results": [{"id": 1, "title": "A"}]}"#)))
            .unwrap();
        drain_tasks().await;
        assert!(rx.borrow().is_loading());

        second_tx
            .send(Ok(list_payload(r#"{"results": [{"id": 2, "title": "B"}]}"#)))
            .unwrap();
        let state = wait_terminal(&mut rx).await;
        assert_eq!(state, ResultState::Success(vec![movie(2, "B")]));
    }

    // ------------------------------------------------------------------
    // Watchlist
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_watchlist_reacts_to_add_and_remove() {
        let (service, _dir) =
            service_with_remote(Arc::new(MockMovieRemoteDataSource::new()));

        let mut watchlist_rx = service.watchlist();
        assert_eq!(*watchlist_rx.borrow(), ResultState::Success(vec![]));

        let mut member_rx = service.is_in_watchlist(1);
        assert!(!*member_rx.borrow());

        service.add_to_watchlist(&movie(1, "Dune")).await.unwrap();

        member_rx.changed().await.unwrap();
        assert!(*member_rx.borrow());

        watchlist_rx.changed().await.unwrap();
        assert_eq!(
            *watchlist_rx.borrow(),
            ResultState::Success(vec![movie(1, "Dune")])
        );

        service.remove_from_watchlist(1).await.unwrap();

        member_rx.changed().await.unwrap();
        assert!(!*member_rx.borrow());

        watchlist_rx.changed().await.unwrap();
        assert_eq!(*watchlist_rx.borrow(), ResultState::Success(vec![]));
    }

    #[tokio::test]
    async fn test_watchlist_writes_do_not_touch_catalog_slots() {
        // The mock has no expectations: any remote call would panic.
        let (service, _dir) =
            service_with_remote(Arc::new(MockMovieRemoteDataSource::new()));

        service.add_to_watchlist(&movie(1, "Dune")).await.unwrap();
        service.remove_from_watchlist(1).await.unwrap();
    }

    #[tokio::test]
    async fn test_watchlist_read_failure_publishes_error() {
        let (pool, _dir) = test_pool();
        let repo: Arc<dyn WatchlistRepository> =
            Arc::new(SqliteWatchlistRepository::new(Arc::clone(&pool)));
        let store = Arc::new(WatchlistStore::new(repo));
        let service = MovieService::new(Arc::new(MockMovieRemoteDataSource::new()), store);

        // Break the store out from under the service.
        pool.get()
            .unwrap()
            .execute("DROP TABLE watchlist", [])
            .unwrap();

        let rx = service.watchlist();
        assert!(rx.borrow().is_error());
    }

    #[tokio::test]
    async fn test_watchlist_subscribers_share_one_stream() {
        let (service, _dir) =
            service_with_remote(Arc::new(MockMovieRemoteDataSource::new()));

        let mut rx_a = service.watchlist();
        let mut rx_b = service.watchlist();

        service.add_to_watchlist(&movie(1, "Dune")).await.unwrap();

        tokio::time::timeout(Duration::from_secs(1), rx_a.changed())
            .await
            .unwrap()
            .unwrap();
        tokio::time::timeout(Duration::from_secs(1), rx_b.changed())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(*rx_a.borrow(), *rx_b.borrow());
    }
}
