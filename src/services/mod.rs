pub mod catalog;
pub mod engine;
pub mod recommender;

pub use catalog::{load_dataset, Catalog, CatalogProvider, Dataset};
pub use engine::Engine;
pub use recommender::Recommender;
