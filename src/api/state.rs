use std::sync::Arc;

use crate::services::{CatalogAccessor, ChannelManager, Recommender};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogAccessor>,
    pub recommender: Arc<Recommender>,
    pub channels: ChannelManager,
}

impl AppState {
    /// Wires the recommender and preference channel over a catalog
    ///
    /// `recommendation_seed` fixes the scoring random source; `None` seeds it from entropy.
    pub fn new(catalog: Arc<dyn CatalogAccessor>, recommendation_seed: Option<u64>) -> Self {
        let recommender = Arc::new(Recommender::new(catalog.clone(), recommendation_seed));
        let channels = ChannelManager::new(recommender.clone());

        Self {
            catalog,
            recommender,
            channels,
        }
    }
}
