//! Captain records as stored by the rest of the backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored `{ ltd, lng }` pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub ltd: f64,
    pub lng: f64,
}

/// A captain (driver) record.
///
/// `_id` is kept opaque (plain string or an exported `{"$oid": ...}`). The
/// `location` field stays inside `profile` with every other field
/// (`fullname`, `vehicle`, `status`, `socketId`, ...) so records round-trip
/// untouched; [`Captain::location`] interprets it on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Captain {
    #[serde(rename = "_id", default, skip_serializing_if = "Value::is_null")]
    pub id: Value,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl Captain {
    /// The stored position, if it is a usable `{ ltd, lng }` pair.
    ///
    /// Missing or malformed locations yield `None`; such captains never match
    /// a radius query.
    pub fn location(&self) -> Option<GeoPoint> {
        self.profile
            .get("location")
            .and_then(|v| GeoPoint::deserialize(v).ok())
    }
}
