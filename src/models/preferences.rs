use serde::{Deserialize, Serialize};

use super::TagId;

/// The user's selected tags, kept in insertion order
///
/// Scoring treats the selection as an unordered set; the order only matters
/// for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PreferenceSet {
    tags: Vec<TagId>,
}

impl PreferenceSet {
    /// Creates an empty preference set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the tag if absent, removes it if present.
    ///
    /// Returns `true` when the tag is selected after the call.
    pub fn toggle(&mut self, tag: TagId) -> bool {
        if let Some(position) = self.tags.iter().position(|t| *t == tag) {
            self.tags.remove(position);
            false
        } else {
            self.tags.push(tag);
            true
        }
    }

    pub fn contains(&self, tag: TagId) -> bool {
        self.tags.contains(&tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TagId> + '_ {
        self.tags.iter().copied()
    }

    pub fn as_slice(&self) -> &[TagId] {
        &self.tags
    }
}

impl FromIterator<TagId> for PreferenceSet {
    fn from_iter<I: IntoIterator<Item = TagId>>(iter: I) -> Self {
        let mut set = PreferenceSet::new();
        for tag in iter {
            if !set.contains(tag) {
                set.tags.push(tag);
            }
        }
        set
    }
}
