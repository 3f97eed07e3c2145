// src/models/bookmarks.rs

//! Bookmarked contest IDs.

use serde::{Deserialize, Serialize};

/// Set of bookmarked contest IDs.
///
/// Insertion order is preserved so the persisted list stays stable
/// between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkSet {
    ids: Vec<String>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a list of IDs, dropping duplicates.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for id in ids {
            let id = id.into();
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|b| b == id)
    }

    /// Add the ID if absent, remove it if present.
    ///
    /// Returns whether the ID is bookmarked afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|b| b == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut set = BookmarkSet::from_ids(["cf-1"]);
        let original = set.clone();

        assert!(set.toggle("lc-2"));
        assert!(set.contains("lc-2"));
        assert!(!set.toggle("lc-2"));
        assert_eq!(set, original);

        assert!(!set.toggle("cf-1"));
        assert!(set.toggle("cf-1"));
        assert_eq!(set, original);
    }

    #[test]
    fn test_from_ids_dedups() {
        let set = BookmarkSet::from_ids(["a", "b", "a"]);
        assert_eq!(set.ids(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let set = BookmarkSet::from_ids(["cc-START1", "cf-2"]);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["cc-START1","cf-2"]"#);
    }
}
