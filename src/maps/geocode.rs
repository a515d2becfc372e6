//! Address → coordinate resolution via the geocoding endpoint.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, error, warn};

use super::transport::MapsTransport;
use super::types::{Coordinate, MapsError};
use super::upstream_error;
use crate::config::MapsConfig;

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

const FAILURE: &str = "Unable to fetch coordinates";

pub struct AddressResolver {
    transport: Arc<dyn MapsTransport>,
    config: Arc<MapsConfig>,
}

impl AddressResolver {
    pub fn new(transport: Arc<dyn MapsTransport>, config: Arc<MapsConfig>) -> Self {
        Self { transport, config }
    }

    /// Geocode `address` and return the first result's location.
    pub async fn resolve(&self, address: &str) -> Result<Coordinate, MapsError> {
        if address.is_empty() {
            warn!("Geocode request rejected: empty address");
            return Err(MapsError::InvalidArgument("Address is required".into()));
        }

        let body = self
            .transport
            .get_json(
                &self.config.geocode_url,
                &[("address", address), ("key", self.config.api_key.as_str())],
            )
            .await
            .inspect_err(|e| error!("Error fetching coordinates: {}", e))?;

        let parsed = match GeocodeResponse::deserialize(&body) {
            Ok(p) => p,
            Err(e) => {
                debug!("Geocode response did not match schema: {}", e);
                return Err(upstream_error("Geocode", FAILURE, body));
            }
        };

        match parsed.results.first() {
            Some(first) if parsed.status == "OK" => Ok(Coordinate {
                latitude: first.geometry.location.lat,
                longitude: first.geometry.location.lng,
            }),
            _ => Err(upstream_error("Geocode", FAILURE, body)),
        }
    }
}
