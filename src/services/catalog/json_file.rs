use serde::Deserialize;
use std::path::PathBuf;

use crate::{
    error::AppResult,
    models::{Genre, Item, SyntheticPeer},
    services::catalog::{embedded, CatalogProvider},
};

/// On-disk dataset layout
///
/// `genres` and `peers` are optional and fall back to the built-in tables.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    items: Vec<Item>,
    #[serde(default = "embedded::sample_genres")]
    genres: Vec<Genre>,
    #[serde(default = "embedded::reference_peers")]
    peers: Vec<SyntheticPeer>,
}

/// Catalog read from a JSON document on disk
///
/// The file is read once per `load_*` call; the engine only loads at start-up.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_document(&self) -> AppResult<CatalogDocument> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let document = serde_json::from_str(&raw)?;
        Ok(document)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for JsonFileCatalog {
    async fn load_items(&self) -> AppResult<Vec<Item>> {
        Ok(self.read_document().await?.items)
    }

    async fn load_genres(&self) -> AppResult<Vec<Genre>> {
        Ok(self.read_document().await?.genres)
    }

    async fn load_peers(&self) -> AppResult<Vec<SyntheticPeer>> {
        Ok(self.read_document().await?.peers)
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::catalog::load_dataset;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cinema_api_{}_{}.json", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_loads_items_with_default_tables() {
        let path = write_temp(
            "defaults",
            r#"{"items": [
                {"id": 1, "title": "The Matrix", "genre_ids": [28, 878], "vote_average": 8.7},
                {"id": 2, "title": "Inception", "genre_ids": [28, 878, 53], "vote_average": 8.8}
            ]}"#,
        );

        let provider = JsonFileCatalog::new(&path);
        let dataset = load_dataset(&provider).await.unwrap();
        assert_eq!(dataset.catalog.len(), 2);
        assert_eq!(dataset.genres.label(878), "Science Fiction");
        assert_eq!(dataset.peers.len(), 3);

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_loads_custom_peers() {
        let path = write_temp(
            "peers",
            r#"{
                "items": [{"id": 4, "title": "Dune", "category_tags": [878], "quality_score": 7.9}],
                "genres": [{"id": 878, "name": "Sci-Fi"}],
                "peers": [{"peer_id": 9, "liked_tags": [878], "ratings": {"4": 10}}]
            }"#,
        );

        let provider = JsonFileCatalog::new(&path);
        let peers = provider.load_peers().await.unwrap();
        assert_eq!(peers, vec![SyntheticPeer::new(9, [878], [(4, 10)])]);
        assert_eq!(provider.load_genres().await.unwrap(), vec![Genre::new(878, "Sci-Fi")]);

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let provider = JsonFileCatalog::new("/nonexistent/cinema_api/catalog.json");
        let result = provider.load_items().await;
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[tokio::test]
    async fn test_malformed_file_is_serialization_error() {
        let path = write_temp("malformed", r#"{"items": [{"id": "one"}]}"#);

        let result = JsonFileCatalog::new(&path).load_items().await;
        assert!(matches!(result, Err(AppError::Serialization(_))));

        std::fs::remove_file(path).unwrap();
    }
}
