use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{ItemId, PreferenceSet, TagId};

/// Minimum peer rating for an item to count as liked (inclusive)
pub const LIKE_THRESHOLD: u8 = 7;

/// A stand-in user profile for the collaborative strategy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyntheticPeer {
    pub peer_id: u32,
    pub liked_tags: BTreeSet<TagId>,
    /// Item id to rating on a 0-10 scale
    pub ratings: BTreeMap<ItemId, u8>,
}

impl SyntheticPeer {
    pub fn new(
        peer_id: u32,
        liked_tags: impl IntoIterator<Item = TagId>,
        ratings: impl IntoIterator<Item = (ItemId, u8)>,
    ) -> Self {
        Self {
            peer_id,
            liked_tags: liked_tags.into_iter().collect(),
            ratings: ratings.into_iter().collect(),
        }
    }

    /// Any overlap between the peer's liked tags and the preferences qualifies
    pub fn shares_taste(&self, preferences: &PreferenceSet) -> bool {
        preferences.iter().any(|tag| self.liked_tags.contains(&tag))
    }

    /// Items this peer rated at or above [`LIKE_THRESHOLD`]
    pub fn liked_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.ratings
            .iter()
            .filter(|(_, rating)| **rating >= LIKE_THRESHOLD)
            .map(|(id, _)| *id)
    }
}
