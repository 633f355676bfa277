use serde::{Deserialize, Serialize};
use std::fmt::Display;

mod genre;
mod item;
mod peer;
mod preferences;

pub use genre::{Genre, GenreDirectory, UNKNOWN_GENRE};
pub use item::{Item, ScoredItem};
pub use peer::{SyntheticPeer, LIKE_THRESHOLD};
pub use preferences::PreferenceSet;

/// Catalog item identifier
pub type ItemId = u32;

/// Category tag identifier (a TMDB genre id in the sample data)
pub type TagId = u32;

/// Scoring strategy used by the recommendation engine
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Genre overlap weighted with the item's rating
    #[default]
    Content,
    /// Items rated highly by synthetic peers with overlapping tastes
    Collaborative,
    /// Content results followed by unseen collaborative results
    Hybrid,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Content, Strategy::Collaborative, Strategy::Hybrid];

    /// Short human readable description shown next to the strategy picker
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Content => "Recommends movies similar to your genre preferences",
            Strategy::Collaborative => "Suggests movies liked by users with similar tastes",
            Strategy::Hybrid => "Combines both approaches for better accuracy",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Content => write!(f, "content"),
            Strategy::Collaborative => write!(f, "collaborative"),
            Strategy::Hybrid => write!(f, "hybrid"),
        }
    }
}
