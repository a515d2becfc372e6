//! Captain lookup: spherical radius search over a read-only captain store.

pub mod search;
pub mod sphere;
pub mod store;
pub mod types;

pub use search::ProximitySearch;
pub use sphere::{central_angle, SphereQuery, EARTH_RADIUS_KM};
pub use store::{CaptainStore, JsonCaptainStore};
pub use types::{Captain, GeoPoint};
