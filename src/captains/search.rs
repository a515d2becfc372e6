//! Radius search for captains around a point.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::sphere::SphereQuery;
use super::store::CaptainStore;
use super::types::{Captain, GeoPoint};
use crate::maps::MapsError;

pub struct ProximitySearch {
    store: Arc<dyn CaptainStore>,
}

impl ProximitySearch {
    pub fn new(store: Arc<dyn CaptainStore>) -> Self {
        Self { store }
    }

    /// All captains within `radius_km` of (`latitude`, `longitude`).
    ///
    /// Absent parameters are rejected; zero is a valid latitude or longitude.
    /// The store's answer is returned as-is: no sorting, no limit.
    pub async fn find_nearby(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        radius_km: Option<f64>,
    ) -> Result<Vec<Captain>, MapsError> {
        let query = build_query(latitude, longitude, radius_km).inspect_err(|e| {
            warn!("Captain radius search rejected: {}", e);
        })?;

        let captains = self
            .store
            .find_within_sphere(&query)
            .await
            .inspect_err(|e| error!("Error fetching captains in the radius: {}", e))?;

        info!(filter = %query.to_filter(), "Found {} captains in the radius", captains.len());
        Ok(captains)
    }
}

fn build_query(
    latitude: Option<f64>,
    longitude: Option<f64>,
    radius_km: Option<f64>,
) -> Result<SphereQuery, MapsError> {
    let (Some(ltd), Some(lng), Some(radius)) = (latitude, longitude, radius_km) else {
        return Err(MapsError::InvalidArgument(
            "Latitude, longitude, and radius are required".into(),
        ));
    };

    if !(-90.0..=90.0).contains(&ltd) || !(-180.0..=180.0).contains(&lng) {
        return Err(MapsError::InvalidArgument(
            "Invalid coordinates. Lat: -90..90, Lng: -180..180".into(),
        ));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MapsError::InvalidArgument(
            "Radius must be a positive number of kilometers".into(),
        ));
    }

    Ok(SphereQuery::from_radius_km(GeoPoint { ltd, lng }, radius))
}
