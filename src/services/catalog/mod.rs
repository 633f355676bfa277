//! Catalog data sources
//!
//! The recommendation core needs a finite, static list of items (plus the genre
//! names and synthetic peer table) before any scoring starts. Providers supply
//! the raw data; [`Dataset::from_parts`] validates it once at start-up.

use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Genre, GenreDirectory, Item, ItemId, PreferenceSet, SyntheticPeer, TagId},
};

pub mod embedded;
pub mod json_file;

pub use embedded::EmbeddedCatalog;
pub use json_file::JsonFileCatalog;

/// Highest quality score accepted from a data source
pub const MAX_QUALITY_SCORE: f64 = 10.0;

/// Validation failures for loaded catalog data
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("item id must be positive")]
    ZeroItemId,
    #[error("duplicate item id {0}")]
    DuplicateItemId(ItemId),
    #[error("item {0} has an empty title")]
    EmptyTitle(ItemId),
    #[error("item {id} has quality score {score} outside 0-10")]
    QualityOutOfRange { id: ItemId, score: f64 },
    #[error("duplicate synthetic peer id {0}")]
    DuplicatePeerId(u32),
}

/// Source of catalog data
///
/// Implementations load everything the engine needs in one go. The embedded
/// sample set is the default; a JSON file can replace it in deployments.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Items in catalog order
    async fn load_items(&self) -> AppResult<Vec<Item>>;

    /// Tag id to name table
    async fn load_genres(&self) -> AppResult<Vec<Genre>>;

    /// Synthetic peers for the collaborative strategy
    async fn load_peers(&self) -> AppResult<Vec<SyntheticPeer>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Immutable, cheaply cloneable list of items
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Arc<[Item]>,
}

impl Catalog {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether any item carries the tag
    pub fn has_tag(&self, tag: TagId) -> bool {
        self.items.iter().any(|item| item.has_tag(tag))
    }

    /// The item highlighted on the landing page
    pub fn featured(&self) -> Option<&Item> {
        self.items.first()
    }

    /// Case-insensitive title search, narrowed to preferred tags when any are selected
    pub fn search(&self, query: &str, preferences: &PreferenceSet) -> Vec<&Item> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .filter(|item| preferences.is_empty() || preferences.iter().any(|tag| item.has_tag(tag)))
            .collect()
    }
}

/// Everything loaded at start-up
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalog: Catalog,
    pub genres: Arc<GenreDirectory>,
    pub peers: Arc<[SyntheticPeer]>,
}

impl Dataset {
    /// Validates raw provider data and freezes it
    pub fn from_parts(
        items: Vec<Item>,
        genres: Vec<Genre>,
        peers: Vec<SyntheticPeer>,
    ) -> Result<Self, CatalogError> {
        let mut item_ids = HashSet::new();
        for item in &items {
            if item.id == 0 {
                return Err(CatalogError::ZeroItemId);
            }
            if !item_ids.insert(item.id) {
                return Err(CatalogError::DuplicateItemId(item.id));
            }
            if item.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle(item.id));
            }
            if !(0.0..=MAX_QUALITY_SCORE).contains(&item.quality_score) {
                return Err(CatalogError::QualityOutOfRange {
                    id: item.id,
                    score: item.quality_score,
                });
            }
        }

        let mut peer_ids = HashSet::new();
        for peer in &peers {
            if !peer_ids.insert(peer.peer_id) {
                return Err(CatalogError::DuplicatePeerId(peer.peer_id));
            }
        }

        Ok(Self {
            catalog: Catalog {
                items: items.into(),
            },
            genres: Arc::new(GenreDirectory::new(genres)),
            peers: peers.into(),
        })
    }

    /// The built-in sample dataset
    pub fn embedded() -> Self {
        Self {
            catalog: Catalog {
                items: embedded::sample_items().into(),
            },
            genres: Arc::new(GenreDirectory::new(embedded::sample_genres())),
            peers: embedded::reference_peers().into(),
        }
    }
}

/// Loads and validates a dataset from a provider
pub async fn load_dataset(provider: &dyn CatalogProvider) -> AppResult<Dataset> {
    let items = provider.load_items().await?;
    let genres = provider.load_genres().await?;
    let peers = provider.load_peers().await?;

    let dataset = Dataset::from_parts(items, genres, peers)?;

    tracing::info!(
        provider = provider.name(),
        items = dataset.catalog.len(),
        genres = dataset.genres.genres().len(),
        peers = dataset.peers.len(),
        "Catalog loaded"
    );

    Ok(dataset)
}
