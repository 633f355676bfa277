use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ItemId, TagId};

/// A catalog entry (a movie in the sample data)
///
/// Only `id`, `category_tags` and `quality_score` take part in scoring. The
/// descriptive fields are carried through untouched for the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Unique positive identifier
    pub id: ItemId,
    /// Display title
    pub title: String,
    /// Genre ids attached to the item
    #[serde(alias = "genre_ids")]
    pub category_tags: BTreeSet<TagId>,
    /// Average rating on a 0-10 scale
    #[serde(alias = "vote_average")]
    pub quality_score: f64,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub overview: String,
    #[serde(default, alias = "poster_path")]
    pub poster_ref: Option<String>,
    #[serde(default, alias = "backdrop_path")]
    pub backdrop_ref: Option<String>,
    #[serde(default, alias = "runtime")]
    pub runtime_minutes: Option<u32>,
}

impl Item {
    /// Creates an item with only the fields the scorers look at
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        category_tags: impl IntoIterator<Item = TagId>,
        quality_score: f64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            category_tags: category_tags.into_iter().collect(),
            quality_score,
            release_date: None,
            overview: String::new(),
            poster_ref: None,
            backdrop_ref: None,
            runtime_minutes: None,
        }
    }

    /// Whether the item carries the given tag
    pub fn has_tag(&self, tag: TagId) -> bool {
        self.category_tags.contains(&tag)
    }
}

/// An item paired with its transient ranking score
#[derive(Debug, Clone, Copy)]
pub struct ScoredItem<'a> {
    pub item: &'a Item,
    pub score: f64,
}
