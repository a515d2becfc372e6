//! HTTP transport for the maps web services.
//!
//! The operations only ever need "GET this endpoint with these query
//! parameters and hand me the JSON body", so that is the whole trait. The
//! ureq implementation runs the blocking call on tokio's blocking pool.

use async_trait::async_trait;
use serde_json::Value;
use tracing::trace;
use ureq::Agent;

use super::types::MapsError;

#[async_trait]
pub trait MapsTransport: Send + Sync {
    /// Issue one GET against `endpoint` with URL-encoded `params` and decode
    /// the body as JSON.
    async fn get_json(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, MapsError>;
}

/// Transport backed by a shared `ureq::Agent` (default timeouts and pooling).
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self { agent: ureq::AgentBuilder::new().build() }
    }

    fn get_json_blocking(
        agent: &Agent,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Value, MapsError> {
        let mut request = agent.get(endpoint);
        for (name, value) in params {
            request = request.query(name, value);
        }

        // ureq's own Display includes the full URL, which carries the API key.
        let response = request.call().map_err(|e| match e {
            ureq::Error::Status(code, _) => {
                MapsError::Transport(format!("{} responded with status {}", endpoint, code))
            }
            ureq::Error::Transport(t) => MapsError::Transport(match t.message() {
                Some(msg) => format!("{}: {}", t.kind(), msg),
                None => t.kind().to_string(),
            }),
        })?;

        response
            .into_json::<Value>()
            .map_err(|e| MapsError::Transport(format!("invalid JSON from {}: {}", endpoint, e)))
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MapsTransport for UreqTransport {
    async fn get_json(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, MapsError> {
        let agent = self.agent.clone();
        let endpoint = endpoint.to_string();
        let params: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        trace!(endpoint = %endpoint, "maps request");

        tokio::task::spawn_blocking(move || Self::get_json_blocking(&agent, &endpoint, &params))
            .await
            .map_err(|e| MapsError::Transport(format!("request task failed: {}", e)))?
    }
}
