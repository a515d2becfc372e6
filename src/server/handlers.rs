use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::captains::Captain;
use crate::maps::{Coordinate, DistanceMetric, MapsError};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    kind: &'static str,
    code: u16,
}

pub struct ApiError(StatusCode, MapsError);

impl From<MapsError> for ApiError {
    fn from(e: MapsError) -> Self {
        let status = match e {
            MapsError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            MapsError::NoRouteFound => StatusCode::NOT_FOUND,
            MapsError::Upstream { .. } | MapsError::Transport(_) => StatusCode::BAD_GATEWAY,
            MapsError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError(status, e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1.to_string(),
            kind: self.1.kind(),
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

// ─── GET /health ─────────────────────────────────────────────────

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ─── GET /maps/get-coordinates ───────────────────────────────────

#[derive(Deserialize)]
pub struct CoordinatesQuery {
    pub address: Option<String>,
}

pub async fn coordinates(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoordinatesQuery>,
) -> Result<Json<Coordinate>, ApiError> {
    let start = Instant::now();
    let address = params.address.unwrap_or_default();

    let coord = state.resolver.resolve(&address).await?;

    info!(
        "GET /maps/get-coordinates address={} -> ({}, {}) ({:.1}ms)",
        address, coord.latitude, coord.longitude, elapsed_ms(start),
    );
    Ok(Json(coord))
}

// ─── GET /maps/get-distance-time ─────────────────────────────────

#[derive(Deserialize)]
pub struct DistanceQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

pub async fn distance_time(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DistanceQuery>,
) -> Result<Json<DistanceMetric>, ApiError> {
    let start = Instant::now();
    let origin = params.origin.unwrap_or_default();
    let destination = params.destination.unwrap_or_default();

    let metric = state.metrics.measure(&origin, &destination).await?;

    info!(
        "GET /maps/get-distance-time {} -> {} ({:.1}ms)",
        origin, destination, elapsed_ms(start),
    );
    Ok(Json(metric))
}

// ─── GET /maps/get-suggestions ───────────────────────────────────

#[derive(Deserialize)]
pub struct SuggestionsQuery {
    pub input: Option<String>,
}

pub async fn suggestions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestionsQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let start = Instant::now();
    let input = params.input.unwrap_or_default();

    let list = state.suggestions.suggest(&input).await?;

    info!(
        "GET /maps/get-suggestions input={} -> {} suggestions ({:.1}ms)",
        input, list.len(), elapsed_ms(start),
    );
    Ok(Json(list))
}

// ─── GET /maps/captains-in-radius ────────────────────────────────

/// Raw strings so that empty and malformed values get the JSON error body.
#[derive(Deserialize)]
pub struct RadiusQuery {
    pub ltd: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
}

/// Empty counts as absent; anything else must parse as a number.
fn parse_number(name: &str, raw: Option<&str>) -> Result<Option<f64>, MapsError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| MapsError::InvalidArgument(format!("Invalid {} '{}'", name, s))),
    }
}

pub async fn captains_in_radius(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RadiusQuery>,
) -> Result<Json<Vec<Captain>>, ApiError> {
    let ltd = parse_number("ltd", params.ltd.as_deref())?;
    let lng = parse_number("lng", params.lng.as_deref())?;
    let radius = parse_number("radius", params.radius.as_deref())?;

    let captains = state.captains.find_nearby(ltd, lng, radius).await?;
    Ok(Json(captains))
}
