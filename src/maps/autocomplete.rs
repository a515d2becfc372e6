//! Place autocomplete suggestions.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, error, warn};

use super::transport::MapsTransport;
use super::types::MapsError;
use super::upstream_error;
use crate::config::MapsConfig;

#[derive(Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
struct Prediction {
    description: String,
}

const FAILURE: &str = "Unable to fetch suggestions";

pub struct SuggestionProvider {
    transport: Arc<dyn MapsTransport>,
    config: Arc<MapsConfig>,
}

impl SuggestionProvider {
    pub fn new(transport: Arc<dyn MapsTransport>, config: Arc<MapsConfig>) -> Self {
        Self { transport, config }
    }

    /// Place descriptions for partial `input`, in upstream ranking order.
    pub async fn suggest(&self, input: &str) -> Result<Vec<String>, MapsError> {
        if input.is_empty() {
            warn!("Autocomplete request rejected: empty input");
            return Err(MapsError::InvalidArgument("Input query is required".into()));
        }

        let body = self
            .transport
            .get_json(
                &self.config.autocomplete_url,
                &[("input", input), ("key", self.config.api_key.as_str())],
            )
            .await
            .inspect_err(|e| error!("Error fetching autocomplete suggestions: {}", e))?;

        let parsed = match AutocompleteResponse::deserialize(&body) {
            Ok(p) => p,
            Err(e) => {
                debug!("Autocomplete response did not match schema: {}", e);
                return Err(upstream_error("Autocomplete", FAILURE, body));
            }
        };

        if parsed.status != "OK" || parsed.predictions.is_empty() {
            return Err(upstream_error("Autocomplete", FAILURE, body));
        }

        Ok(parsed.predictions.into_iter().map(|p| p.description).collect())
    }
}
