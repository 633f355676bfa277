use std::sync::Arc;
use std::time::Duration;

use crate::{
    models::{GenreDirectory, TagId},
    services::{
        catalog::{Catalog, Dataset},
        engine::Engine,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub catalog: Catalog,
    pub genres: Arc<GenreDirectory>,
}

impl AppState {
    /// Builds the state around a loaded dataset
    pub fn new(dataset: Dataset, analysis_delay: Duration) -> Self {
        let engine = Engine::new(dataset.catalog.clone(), dataset.peers, analysis_delay);
        Self {
            engine,
            catalog: dataset.catalog,
            genres: dataset.genres,
        }
    }

    /// Whether a tag may be offered to the user
    pub fn is_known_tag(&self, tag: TagId) -> bool {
        self.genres.contains(tag) || self.catalog.has_tag(tag)
    }
}
