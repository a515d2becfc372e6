//! Core types for the maps subsystem.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A geocoded point. Serialised with the `ltd`/`lng` field names the rest of
/// the backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "ltd")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

/// A `{ text, value }` pair as returned by the distance matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

/// One distance-matrix element, passed through as upstream returned it.
///
/// `distance.value` is in meters and `duration.value` in seconds. Elements
/// whose status is not `OK` carry no distance or duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMetric {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<TextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TextValue>,
    /// Any other element fields (e.g. `duration_in_traffic`, `fare`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Errors raised by the maps and captain operations.
#[derive(Debug, Clone, Error)]
pub enum MapsError {
    /// A required parameter was missing or unusable. Nothing was sent.
    #[error("{0}")]
    InvalidArgument(String),
    /// Upstream answered, but with a non-OK status or an empty result set.
    #[error("{message}")]
    Upstream {
        message: &'static str,
        /// The offending response body, kept for diagnostics.
        body: Value,
    },
    /// The distance matrix knows both places but no route connects them.
    #[error("No routes found")]
    NoRouteFound,
    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),
    /// The captain store failed to answer the query.
    #[error("captain store error: {0}")]
    Store(String),
}

impl MapsError {
    /// Short machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Upstream { .. } => "upstream_error",
            Self::NoRouteFound => "no_route_found",
            Self::Transport(_) => "transport_error",
            Self::Store(_) => "store_error",
        }
    }
}
