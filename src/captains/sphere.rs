//! Spherical cap queries: "everything within this angle of that point".

use serde_json::{json, Value};

use super::types::GeoPoint;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A cap on the unit sphere, centered on `center` with an angular radius in
/// radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereQuery {
    pub center: GeoPoint,
    pub radians: f64,
}

impl SphereQuery {
    /// Cap covering every point within `radius_km` of `center` along the
    /// Earth's surface.
    pub fn from_radius_km(center: GeoPoint, radius_km: f64) -> Self {
        Self { center, radians: radius_km / EARTH_RADIUS_KM }
    }

    pub fn radius_km(&self) -> f64 {
        self.radians * EARTH_RADIUS_KM
    }

    /// Whether `point` lies inside the cap (boundary included).
    pub fn contains(&self, point: GeoPoint) -> bool {
        central_angle(self.center, point) <= self.radians
    }

    /// The same query in document-store filter syntax, for logs and stores
    /// that accept it.
    pub fn to_filter(&self) -> Value {
        json!({
            "location": {
                "$geoWithin": {
                    "$centerSphere": [[self.center.ltd, self.center.lng], self.radians]
                }
            }
        })
    }
}

/// Great-circle angle between two points, in radians (haversine form).
pub fn central_angle(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.ltd.to_radians();
    let phi2 = b.ltd.to_radians();
    let d_phi = phi2 - phi1;
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin()
}
