//! HTTP API over the maps and captain operations.

mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/maps/get-coordinates", get(handlers::coordinates))
        .route("/maps/get-distance-time", get(handlers::distance_time))
        .route("/maps/get-suggestions", get(handlers::suggestions))
        .route("/maps/captains-in-radius", get(handlers::captains_in_radius))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, state: AppState) -> std::io::Result<()> {
    let app = build_router(Arc::new(state));
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("ridemaps server listening on http://{}", addr);

    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captains::store::fake::RecordingStore;
    use crate::captains::{Captain, CaptainStore, JsonCaptainStore};
    use crate::config::MapsConfig;
    use crate::maps::transport::fake::FakeTransport;
    use crate::maps::MapsError;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router(transport: FakeTransport, store: impl CaptainStore + 'static) -> Router {
        let state = AppState::new(MapsConfig::new("k"), Arc::new(transport), Arc::new(store));
        build_router(Arc::new(state))
    }

    fn empty_store() -> RecordingStore {
        RecordingStore::returning(vec![])
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(FakeTransport::ok(json!({})), empty_store());
        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_coordinates() {
        let transport = FakeTransport::ok(json!({
            "status": "OK",
            "results": [{"geometry": {"location": {"lat": 12.34, "lng": 56.78}}}]
        }));
        let (status, body) =
            get_json(router(transport, empty_store()), "/maps/get-coordinates?address=Main%20St").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ltd": 12.34, "lng": 56.78}));
    }

    #[tokio::test]
    async fn test_missing_address_is_bad_request() {
        let app = router(FakeTransport::ok(json!({})), empty_store());
        let (status, body) = get_json(app, "/maps/get-coordinates").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "invalid_argument");
        assert_eq!(body["error"], "Address is required");
        assert_eq!(body["code"], 400);
    }

    #[tokio::test]
    async fn test_no_route_is_not_found() {
        let transport = FakeTransport::ok(json!({
            "status": "OK",
            "rows": [{"elements": [{"status": "ZERO_RESULTS"}]}]
        }));
        let (status, body) = get_json(
            router(transport, empty_store()),
            "/maps/get-distance-time?origin=A&destination=B",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "no_route_found");
    }

    #[tokio::test]
    async fn test_upstream_and_transport_are_bad_gateway() {
        let denied = FakeTransport::ok(json!({"status": "REQUEST_DENIED"}));
        let (status, body) =
            get_json(router(denied, empty_store()), "/maps/get-suggestions?input=ban").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Unable to fetch suggestions");

        let down = FakeTransport::failing(MapsError::Transport("Connection Failed".into()));
        let (status, body) =
            get_json(router(down, empty_store()), "/maps/get-suggestions?input=ban").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["kind"], "transport_error");
    }

    #[tokio::test]
    async fn test_captains_in_radius() {
        let captains: Vec<Captain> = serde_json::from_value(json!([
            {"_id": "c1", "location": {"ltd": 10.0, "lng": 20.0}},
            {"_id": "c2", "location": {"ltd": 40.0, "lng": 20.0}}
        ]))
        .unwrap();
        let store = JsonCaptainStore::from_captains(captains);
        let app = router(FakeTransport::ok(json!({})), store);
        let (status, body) = get_json(app, "/maps/captains-in-radius?ltd=10&lng=20&radius=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"_id": "c1", "location": {"ltd": 10.0, "lng": 20.0}}]));
    }

    #[tokio::test]
    async fn test_captains_empty_parameter_is_missing() {
        let app = router(FakeTransport::ok(json!({})), empty_store());
        let (status, body) =
            get_json(app, "/maps/captains-in-radius?ltd=&lng=20&radius=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "invalid_argument");
        assert_eq!(body["error"], "Latitude, longitude, and radius are required");
        assert_eq!(body["code"], 400);
    }

    #[tokio::test]
    async fn test_captains_non_numeric_parameter() {
        let store = Arc::new(RecordingStore::returning(vec![]));
        let state = AppState::new(
            MapsConfig::new("k"),
            Arc::new(FakeTransport::ok(json!({}))),
            store.clone(),
        );
        let app = build_router(Arc::new(state));
        let (status, body) =
            get_json(app, "/maps/captains-in-radius?ltd=abc&lng=20&radius=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "invalid_argument");
        assert_eq!(body["error"], "Invalid ltd 'abc'");
        assert!(store.queries().is_empty());
    }

    #[tokio::test]
    async fn test_captains_missing_radius() {
        let app = router(FakeTransport::ok(json!({})), empty_store());
        let (status, body) = get_json(app, "/maps/captains-in-radius?ltd=10&lng=20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Latitude, longitude, and radius are required");
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let store = RecordingStore::failing(MapsError::Store("disk gone".into()));
        let app = router(FakeTransport::ok(json!({})), store);
        let (status, body) = get_json(app, "/maps/captains-in-radius?ltd=1&lng=2&radius=3").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["kind"], "store_error");
    }
}
