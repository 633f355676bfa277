use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::TagId;

/// Label rendered for tag ids missing from the directory
pub const UNKNOWN_GENRE: &str = "Unknown";

/// A named category tag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: TagId,
    pub name: String,
}

impl Genre {
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Tag id to display name lookup
///
/// Presentation metadata only; the scorers never consult it.
#[derive(Debug, Clone, Default)]
pub struct GenreDirectory {
    genres: Vec<Genre>,
    names: HashMap<TagId, usize>,
}

impl GenreDirectory {
    pub fn new(genres: Vec<Genre>) -> Self {
        let mut directory = Self::default();
        for genre in genres {
            if !directory.names.contains_key(&genre.id) {
                directory.names.insert(genre.id, directory.genres.len());
                directory.genres.push(genre);
            }
        }
        directory
    }

    /// Display name for a tag, or [`UNKNOWN_GENRE`]
    pub fn label(&self, tag: TagId) -> &str {
        self.names
            .get(&tag)
            .map(|index| self.genres[*index].name.as_str())
            .unwrap_or(UNKNOWN_GENRE)
    }

    pub fn contains(&self, tag: TagId) -> bool {
        self.names.contains_key(&tag)
    }

    /// All genres in load order
    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> GenreDirectory {
        GenreDirectory::new(vec![
            Genre::new(28, "Action"),
            Genre::new(878, "Science Fiction"),
        ])
    }

    #[test]
    fn test_label_known_genre() {
        assert_eq!(directory().label(878), "Science Fiction");
    }

    #[test]
    fn test_label_unknown_genre() {
        assert_eq!(directory().label(99999), "Unknown");
        assert!(!directory().contains(99999));
    }

    #[test]
    fn test_duplicate_ids_keep_first_name() {
        let directory = GenreDirectory::new(vec![Genre::new(28, "Action"), Genre::new(28, "Other")]);
        assert_eq!(directory.genres().len(), 1);
        assert_eq!(directory.label(28), "Action");
    }
}
