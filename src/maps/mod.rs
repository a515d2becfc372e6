//! Mapping web service operations: geocoding, distance matrix, autocomplete.
//!
//! Each operation is a thin pass-through: validate input, issue one GET,
//! check the upstream status, extract the interesting part. Failures are
//! logged where they are detected and returned unchanged.

pub mod autocomplete;
pub mod distance;
pub mod geocode;
pub mod transport;
pub mod types;

pub use autocomplete::SuggestionProvider;
pub use distance::RouteMetrics;
pub use geocode::AddressResolver;
pub use transport::{MapsTransport, UreqTransport};
pub use types::{Coordinate, DistanceMetric, MapsError, TextValue};

use serde_json::Value;
use tracing::error;

/// Log the offending upstream body and build the operation's upstream error.
fn upstream_error(api: &str, message: &'static str, body: Value) -> MapsError {
    error!(body = %body, "{} API error", api);
    MapsError::Upstream { message, body }
}
