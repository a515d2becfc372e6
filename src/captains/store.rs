//! Captain persistence boundary and the JSON-file collection.
//!
//! The file is a JSON array of captain documents, loaded once and never
//! written: this crate only reads captains.

use async_trait::async_trait;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::sphere::SphereQuery;
use super::types::Captain;
use crate::maps::MapsError;

/// Anything that can answer "which captains are inside this cap".
#[async_trait]
pub trait CaptainStore: Send + Sync {
    /// Every captain whose location lies within `query`, in store order.
    async fn find_within_sphere(&self, query: &SphereQuery) -> Result<Vec<Captain>, MapsError>;
}

/// Read-only captain collection backed by a JSON file.
pub struct JsonCaptainStore {
    path: Option<PathBuf>,
    captains: Vec<Captain>,
}

impl JsonCaptainStore {
    /// Load from the default location (~/.ridemaps/captains.json).
    pub fn load() -> Result<Self, MapsError> {
        Self::load_from(Self::default_path())
    }

    /// Load from a specific path. A missing file is an empty collection.
    pub fn load_from(path: PathBuf) -> Result<Self, MapsError> {
        let captains = Self::read_file(&path)?;
        debug!(path = %path.display(), count = captains.len(), "Loaded captains");
        Ok(Self { path: Some(path), captains })
    }

    /// In-memory collection, not tied to any file.
    pub fn from_captains(captains: Vec<Captain>) -> Self {
        Self { path: None, captains }
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ridemaps")
            .join("captains.json")
    }

    fn read_file(path: &Path) -> Result<Vec<Captain>, MapsError> {
        let data = match fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(MapsError::Store(format!("cannot read {}: {}", path.display(), e)));
            }
        };
        serde_json::from_str(&data)
            .map_err(|e| MapsError::Store(format!("invalid captain file {}: {}", path.display(), e)))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.captains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captains.is_empty()
    }
}

#[async_trait]
impl CaptainStore for JsonCaptainStore {
    async fn find_within_sphere(&self, query: &SphereQuery) -> Result<Vec<Captain>, MapsError> {
        Ok(self
            .captains
            .iter()
            .filter(|c| c.location().is_some_and(|loc| query.contains(loc)))
            .cloned()
            .collect())
    }
}
