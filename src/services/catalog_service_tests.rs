// src/services/catalog_service_tests.rs
//
// Catalog Synchronizer tests
//
// INVARIANTS TESTED:
// - A successful refresh replaces every section at once
// - A failed refresh keeps the previous snapshot and records the error
// - Only the most recently initiated fetch is applied, whatever order
//   responses arrive in
// - The image-failure set grows idempotently and resets on refresh

#[cfg(test)]
mod catalog_tests {
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::domain::{GenreBucket, MediaUrlResolver};
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::integrations::http::{HttpMethod, NetworkError};
    use crate::services::catalog_service::{CatalogService, FetchOutcome};
    use crate::services::test_support::{emitted, FakeTransport};

    fn movies_body(ids: &[&str]) -> Value {
        let movies: Vec<Value> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                json!({
                    "_id": id,
                    "title": format!("Title {}", id),
                    "genre": ["Action"],
                    "releaseYear": 2000 + i,
                    "thumbnailUrl": format!("/uploads/{}.jpg", id),
                    "videoUrl": format!("/videos/{}.mp4", id),
                    "createdAt": format!("2024-01-{:02}T00:00:00Z", i + 1),
                })
            })
            .collect();
        json!({ "status": "success", "data": { "movies": movies } })
    }

    fn setup() -> (Arc<FakeTransport>, Arc<EventBus>, CatalogService) {
        let transport = Arc::new(FakeTransport::new());
        let bus = Arc::new(EventBus::new());
        let service = CatalogService::new(
            transport.clone(),
            bus.clone(),
            MediaUrlResolver::new("https://media.example.com"),
        );
        (transport, bus, service)
    }

    fn snapshot_ids(service: &CatalogService) -> Vec<String> {
        service
            .snapshot()
            .all_movies
            .iter()
            .map(|m| m.id.clone())
            .collect()
    }

    // ========================================================================
    // SEQUENTIAL REFRESH
    // ========================================================================

    #[tokio::test]
    async fn test_fetch_all_applies_snapshot() {
        let (transport, bus, service) = setup();
        transport.ok(HttpMethod::Get, "/movies", movies_body(&["a", "b", "c"]));

        let outcome = service.fetch_all().await.unwrap();

        match outcome {
            FetchOutcome::Applied(snapshot) => {
                assert_eq!(snapshot.len(), 3);
                assert_eq!(snapshot.recently_added[0].id, "c");
                assert_eq!(snapshot.genre(GenreBucket::Action).len(), 3);
                // nothing flagged featured: first five in fetched order
                assert_eq!(snapshot.featured[0].id, "a");
            }
            FetchOutcome::Superseded => panic!("single fetch cannot be superseded"),
        }
        assert!(service.last_error().is_none());
        assert!(!service.is_refreshing());
        assert_eq!(emitted(&bus), vec!["CatalogRefreshed"]);
    }

    #[tokio::test]
    async fn test_movies_with_id_virtuals_are_all_kept() {
        let (transport, _bus, service) = setup();
        transport.ok(
            HttpMethod::Get,
            "/movies",
            json!({
                "status": "success",
                "data": { "movies": [
                    { "_id": "a", "id": "a", "title": "Arrival" },
                    { "_id": "b", "id": "b", "title": "Heat" }
                ] }
            }),
        );

        service.fetch_all().await.unwrap();

        assert_eq!(snapshot_ids(&service), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_failed_refresh_preserves_previous_snapshot() {
        let (transport, bus, service) = setup();
        transport.ok(HttpMethod::Get, "/movies", movies_body(&["a", "b"]));
        transport.fail(
            HttpMethod::Get,
            "/movies",
            NetworkError::NoResponse("timeout".to_string()),
        );

        service.fetch_all().await.unwrap();
        let err = service.fetch_all().await.unwrap_err();

        assert!(matches!(err, AppError::Connectivity(_)));
        assert!(err.is_retryable());
        assert_eq!(snapshot_ids(&service), vec!["a", "b"]);
        assert!(service.last_error().is_some());
        assert_eq!(emitted(&bus), vec!["CatalogRefreshed", "CatalogFetchFailed"]);
    }

    #[tokio::test]
    async fn test_success_after_failure_clears_error() {
        let (transport, _bus, service) = setup();
        transport.fail(
            HttpMethod::Get,
            "/movies",
            NetworkError::server(500, json!({ "message": "db down" })),
        );
        transport.ok(HttpMethod::Get, "/movies", movies_body(&["a"]));

        assert!(service.fetch_all().await.is_err());
        assert_eq!(service.last_error().as_deref(), Some("Server error (500): db down"));

        service.fetch_all().await.unwrap();
        assert!(service.last_error().is_none());
    }

    #[tokio::test]
    async fn test_missing_movie_list_is_shape_error() {
        let (transport, _bus, service) = setup();
        transport.ok(HttpMethod::Get, "/movies", json!({ "data": {} }));

        let err = service.fetch_all().await.unwrap_err();
        assert!(matches!(err, AppError::ResponseShape(_)));
        assert!(service.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_empty_catalog_is_valid() {
        let (transport, _bus, service) = setup();
        transport.ok(HttpMethod::Get, "/movies", movies_body(&[]));

        let outcome = service.fetch_all().await.unwrap();
        assert!(outcome.is_applied());
        assert!(service.snapshot().featured.is_empty());
    }

    // ========================================================================
    // OUT-OF-ORDER RESPONSES
    // ========================================================================

    #[tokio::test]
    async fn test_older_response_arriving_last_is_discarded() {
        let (transport, bus, service) = setup();
        let first = transport.defer(HttpMethod::Get, "/movies");
        let second = transport.defer(HttpMethod::Get, "/movies");

        let t = transport.clone();
        let driver = async move {
            while t.request_count(HttpMethod::Get, "/movies") < 2 {
                tokio::task::yield_now().await;
            }
            second.send(Ok(movies_body(&["new"]))).unwrap();
            tokio::task::yield_now().await;
            first.send(Ok(movies_body(&["old"]))).unwrap();
        };

        let (r1, r2, _) = tokio::join!(service.fetch_all(), service.fetch_all(), driver);

        assert!(matches!(r1.unwrap(), FetchOutcome::Superseded));
        assert!(r2.unwrap().is_applied());
        assert_eq!(snapshot_ids(&service), vec!["new"]);
        assert!(emitted(&bus).contains(&"StaleCatalogResponseDiscarded".to_string()));
    }

    #[tokio::test]
    async fn test_older_response_arriving_first_is_discarded() {
        let (transport, _bus, service) = setup();
        let first = transport.defer(HttpMethod::Get, "/movies");
        let second = transport.defer(HttpMethod::Get, "/movies");

        let t = transport.clone();
        let driver = async move {
            while t.request_count(HttpMethod::Get, "/movies") < 2 {
                tokio::task::yield_now().await;
            }
            first.send(Ok(movies_body(&["old"]))).unwrap();
            tokio::task::yield_now().await;
            second.send(Ok(movies_body(&["new"]))).unwrap();
        };

        let (r1, r2, _) = tokio::join!(service.fetch_all(), service.fetch_all(), driver);

        assert!(matches!(r1.unwrap(), FetchOutcome::Superseded));
        assert!(r2.unwrap().is_applied());
        assert_eq!(snapshot_ids(&service), vec!["new"]);
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_set_error() {
        let (transport, _bus, service) = setup();
        let first = transport.defer(HttpMethod::Get, "/movies");
        let second = transport.defer(HttpMethod::Get, "/movies");

        let t = transport.clone();
        let driver = async move {
            while t.request_count(HttpMethod::Get, "/movies") < 2 {
                tokio::task::yield_now().await;
            }
            second.send(Ok(movies_body(&["new"]))).unwrap();
            tokio::task::yield_now().await;
            first
                .send(Err(NetworkError::NoResponse("late timeout".to_string())))
                .unwrap();
        };

        let (r1, r2, _) = tokio::join!(service.fetch_all(), service.fetch_all(), driver);

        assert!(matches!(r1.unwrap(), FetchOutcome::Superseded));
        assert!(r2.is_ok());
        assert!(service.last_error().is_none());
    }

    #[tokio::test]
    async fn test_newer_failure_keeps_snapshot_and_discards_older_success() {
        let (transport, _bus, service) = setup();
        transport.ok(HttpMethod::Get, "/movies", movies_body(&["seed"]));
        service.fetch_all().await.unwrap();

        let first = transport.defer(HttpMethod::Get, "/movies");
        let second = transport.defer(HttpMethod::Get, "/movies");

        let t = transport.clone();
        let driver = async move {
            while t.request_count(HttpMethod::Get, "/movies") < 3 {
                tokio::task::yield_now().await;
            }
            second
                .send(Err(NetworkError::NoResponse("offline".to_string())))
                .unwrap();
            tokio::task::yield_now().await;
            first.send(Ok(movies_body(&["old"]))).unwrap();
        };

        let (r1, r2, _) = tokio::join!(service.fetch_all(), service.fetch_all(), driver);

        assert!(matches!(r1.unwrap(), FetchOutcome::Superseded));
        assert!(r2.is_err());
        assert_eq!(snapshot_ids(&service), vec!["seed"]);
        assert!(service.last_error().is_some());
    }

    #[tokio::test]
    async fn test_is_refreshing_tracks_latest_fetch() {
        let (transport, _bus, service) = setup();
        let reply = transport.defer(HttpMethod::Get, "/movies");
        assert!(!service.is_refreshing());

        let t = transport.clone();
        let observer = &service;
        let driver = async move {
            while t.request_count(HttpMethod::Get, "/movies") < 1 {
                tokio::task::yield_now().await;
            }
            assert!(observer.is_refreshing());
            reply.send(Ok(movies_body(&["a"]))).unwrap();
        };

        let (result, _) = tokio::join!(service.fetch_all(), driver);
        result.unwrap();
        assert!(!service.is_refreshing());
    }

    // ========================================================================
    // IMAGE FAILURES
    // ========================================================================

    #[tokio::test]
    async fn test_mark_image_failed_is_idempotent() {
        let (_transport, bus, service) = setup();

        service.mark_image_failed("m1");
        service.mark_image_failed("m1");
        service.mark_image_failed("m2");

        assert!(service.is_image_failed("m1"));
        assert!(!service.is_image_failed("m3"));
        assert_eq!(service.failed_image_count(), 2);
        assert_eq!(emitted(&bus), vec!["ImageLoadFailed", "ImageLoadFailed"]);
    }

    #[tokio::test]
    async fn test_refresh_resets_image_failures() {
        let (transport, _bus, service) = setup();
        transport.fail(
            HttpMethod::Get,
            "/movies",
            NetworkError::NoResponse("offline".to_string()),
        );
        transport.ok(HttpMethod::Get, "/movies", movies_body(&["m1"]));

        service.mark_image_failed("m1");
        let _ = service.fetch_all().await;
        // failed refresh leaves the set alone
        assert!(service.is_image_failed("m1"));

        service.fetch_all().await.unwrap();
        assert_eq!(service.failed_image_count(), 0);
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    #[tokio::test]
    async fn test_get_movie() {
        let (transport, _bus, service) = setup();
        transport.ok(
            HttpMethod::Get,
            "/movies/m9",
            json!({ "data": { "movie": { "_id": "m9", "title": "Arrival", "duration": 116 } } }),
        );
        transport.fail(
            HttpMethod::Get,
            "/movies/missing",
            NetworkError::server(404, json!({ "message": "Movie not found" })),
        );

        let movie = service.get_movie("m9").await.unwrap();
        assert_eq!(movie.title, "Arrival");
        assert_eq!(movie.duration_minutes, 116);

        let err = service.get_movie("missing").await.unwrap_err();
        assert!(matches!(err, AppError::Server { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_local_queries_use_current_snapshot() {
        let (transport, _bus, service) = setup();
        transport.ok(HttpMethod::Get, "/movies", movies_body(&["a", "b", "c"]));
        service.fetch_all().await.unwrap();

        assert_eq!(service.search("title b").len(), 1);
        assert_eq!(service.by_genre("ACTION").len(), 3);
        let trending: Vec<String> = service.trending(2).into_iter().map(|m| m.id).collect();
        assert_eq!(trending, vec!["c", "b"]);

        assert_eq!(
            service.resolve_image_url("/uploads/a.jpg").as_deref(),
            Some("https://media.example.com/uploads/a.jpg")
        );
    }
}
