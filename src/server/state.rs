use std::sync::Arc;

use crate::captains::{CaptainStore, ProximitySearch};
use crate::config::MapsConfig;
use crate::maps::{AddressResolver, MapsTransport, RouteMetrics, SuggestionProvider};

pub struct AppState {
    pub resolver: AddressResolver,
    pub metrics: RouteMetrics,
    pub suggestions: SuggestionProvider,
    pub captains: ProximitySearch,
}

impl AppState {
    pub fn new(
        config: MapsConfig,
        transport: Arc<dyn MapsTransport>,
        store: Arc<dyn CaptainStore>,
    ) -> Self {
        let config = Arc::new(config);
        Self {
            resolver: AddressResolver::new(transport.clone(), config.clone()),
            metrics: RouteMetrics::new(transport.clone(), config.clone()),
            suggestions: SuggestionProvider::new(transport, config),
            captains: ProximitySearch::new(store),
        }
    }
}
