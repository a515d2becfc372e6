//! Travel distance and duration via the distance-matrix endpoint.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, error, warn};

use super::transport::MapsTransport;
use super::types::{DistanceMetric, MapsError};
use super::upstream_error;
use crate::config::MapsConfig;

#[derive(Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<Row>,
}

#[derive(Deserialize)]
struct Row {
    #[serde(default)]
    elements: Vec<DistanceMetric>,
}

const FAILURE: &str = "Unable to fetch distance and time";

pub struct RouteMetrics {
    transport: Arc<dyn MapsTransport>,
    config: Arc<MapsConfig>,
}

impl RouteMetrics {
    pub fn new(transport: Arc<dyn MapsTransport>, config: Arc<MapsConfig>) -> Self {
        Self { transport, config }
    }

    /// Distance and duration between `origin` and `destination`.
    ///
    /// The first element of the first row is returned unchanged. An element
    /// reporting `ZERO_RESULTS` becomes [`MapsError::NoRouteFound`].
    pub async fn measure(&self, origin: &str, destination: &str) -> Result<DistanceMetric, MapsError> {
        if origin.is_empty() || destination.is_empty() {
            warn!("Distance matrix request rejected: origin or destination missing");
            return Err(MapsError::InvalidArgument(
                "Origin and destination are required".into(),
            ));
        }

        let body = self
            .transport
            .get_json(
                &self.config.distance_matrix_url,
                &[
                    ("origins", origin),
                    ("destinations", destination),
                    ("key", self.config.api_key.as_str()),
                ],
            )
            .await
            .inspect_err(|e| error!("Error fetching distance and time: {}", e))?;

        let parsed = match DistanceMatrixResponse::deserialize(&body) {
            Ok(p) => p,
            Err(e) => {
                debug!("Distance matrix response did not match schema: {}", e);
                return Err(upstream_error("Distance Matrix", FAILURE, body));
            }
        };

        if parsed.status != "OK" {
            return Err(upstream_error("Distance Matrix", FAILURE, body));
        }

        let element = parsed
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next());

        match element {
            Some(element) if element.status == "ZERO_RESULTS" => {
                error!(origin, destination, "Error fetching distance and time: No routes found");
                Err(MapsError::NoRouteFound)
            }
            Some(element) => Ok(element),
            None => Err(upstream_error("Distance Matrix", FAILURE, body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::transport::fake::FakeTransport;
    use serde_json::json;

    fn metrics(transport: &Arc<FakeTransport>) -> RouteMetrics {
        RouteMetrics::new(transport.clone(), Arc::new(MapsConfig::new("test-key")))
    }

    #[tokio::test]
    async fn test_measure_returns_first_element() {
        let transport = Arc::new(FakeTransport::ok(json!({
            "status": "OK",
            "rows": [{"elements": [
                {
                    "status": "OK",
                    "distance": {"text": "8.2 km", "value": 8200},
                    "duration": {"text": "18 mins", "value": 1080}
                },
                {"status": "ZERO_RESULTS"}
            ]}]
        })));

        let metric = metrics(&transport).measure("Koramangala", "Indiranagar").await.unwrap();
        assert_eq!(metric.status, "OK");
        assert_eq!(metric.distance.unwrap().value, 8200);
        assert_eq!(metric.duration.unwrap().text, "18 mins");

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].param("origins"), Some("Koramangala"));
        assert_eq!(calls[0].param("destinations"), Some("Indiranagar"));
        assert_eq!(calls[0].param("key"), Some("test-key"));
    }

    #[tokio::test]
    async fn test_measure_requires_both_ends() {
        let transport = Arc::new(FakeTransport::ok(json!({"status": "OK"})));
        let m = metrics(&transport);
        assert!(matches!(m.measure("", "B").await, Err(MapsError::InvalidArgument(_))));
        assert!(matches!(m.measure("A", "").await, Err(MapsError::InvalidArgument(_))));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_measure_zero_results_is_no_route() {
        let transport = Arc::new(FakeTransport::ok(json!({
            "status": "OK",
            "rows": [{"elements": [{"status": "ZERO_RESULTS"}]}]
        })));
        let err = metrics(&transport).measure("Honolulu", "Tokyo").await.unwrap_err();
        assert!(matches!(err, MapsError::NoRouteFound));
        assert_eq!(err.kind(), "no_route_found");
    }

    #[tokio::test]
    async fn test_measure_bad_status() {
        let transport = Arc::new(FakeTransport::ok(json!({
            "status": "INVALID_REQUEST",
            "rows": []
        })));
        let err = metrics(&transport).measure("A", "B").await.unwrap_err();
        assert!(matches!(err, MapsError::Upstream { message: "Unable to fetch distance and time", .. }));
    }

    #[tokio::test]
    async fn test_measure_empty_rows_or_elements() {
        for body in [
            json!({"status": "OK", "rows": []}),
            json!({"status": "OK", "rows": [{"elements": []}]}),
        ] {
            let transport = Arc::new(FakeTransport::ok(body));
            let err = metrics(&transport).measure("A", "B").await.unwrap_err();
            assert_eq!(err.kind(), "upstream_error");
        }
    }

    #[tokio::test]
    async fn test_measure_passes_not_found_element_through() {
        // Only ZERO_RESULTS is special-cased; other element statuses are data.
        let transport = Arc::new(FakeTransport::ok(json!({
            "status": "OK",
            "rows": [{"elements": [{"status": "NOT_FOUND"}]}]
        })));
        let metric = metrics(&transport).measure("A", "B").await.unwrap();
        assert_eq!(metric.status, "NOT_FOUND");
    }
}
