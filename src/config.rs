//! Maps web service configuration.
//!
//! The credential is injected here rather than read from the process
//! environment inside each operation, so tests can point the operations at a
//! fake endpoint without touching global state.

pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com";

const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const DISTANCE_MATRIX_PATH: &str = "/maps/api/distancematrix/json";
const AUTOCOMPLETE_PATH: &str = "/maps/api/place/autocomplete/json";

/// Credential and endpoints for the mapping API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapsConfig {
    /// Sent verbatim as the `key` query parameter. Not validated: an empty or
    /// wrong key is reported by upstream (`REQUEST_DENIED`).
    pub api_key: String,
    pub geocode_url: String,
    pub distance_matrix_url: String,
    pub autocomplete_url: String,
}

impl MapsConfig {
    /// Configuration for the public Google Maps endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, GOOGLE_MAPS_BASE_URL)
    }

    /// Same endpoint paths, different host (proxy, staging, local fake).
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            api_key: api_key.into(),
            geocode_url: format!("{}{}", base, GEOCODE_PATH),
            distance_matrix_url: format!("{}{}", base, DISTANCE_MATRIX_PATH),
            autocomplete_url: format!("{}{}", base, AUTOCOMPLETE_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_defaults() {
        let cfg = MapsConfig::new("abc");
        assert_eq!(cfg.api_key, "abc");
        assert_eq!(cfg.geocode_url, "https://maps.googleapis.com/maps/api/geocode/json");
        assert_eq!(
            cfg.distance_matrix_url,
            "https://maps.googleapis.com/maps/api/distancematrix/json"
        );
        assert_eq!(
            cfg.autocomplete_url,
            "https://maps.googleapis.com/maps/api/place/autocomplete/json"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let cfg = MapsConfig::with_base_url("", "http://127.0.0.1:9000/");
        assert_eq!(cfg.geocode_url, "http://127.0.0.1:9000/maps/api/geocode/json");
    }
}
