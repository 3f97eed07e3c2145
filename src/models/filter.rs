// src/models/filter.rs

//! Filter options for the contest listing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::Platform;

/// Active view filter.
///
/// `show_upcoming` and `show_past` are independent: with both off only
/// ongoing contests remain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub platforms: BTreeSet<Platform>,
    pub show_upcoming: bool,
    pub show_past: bool,
    pub bookmarked_only: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            platforms: Platform::ALL.into_iter().collect(),
            show_upcoming: true,
            show_past: true,
            bookmarked_only: false,
        }
    }
}

impl FilterOptions {
    /// Restrict the filter to the given platforms.
    pub fn with_platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.platforms = platforms.into_iter().collect();
        self
    }

    /// Add the platform if absent, remove it if present.
    pub fn toggle_platform(mut self, platform: Platform) -> Self {
        if !self.platforms.remove(&platform) {
            self.platforms.insert(platform);
        }
        self
    }

    /// The reset value shown after "clear filters".
    pub fn cleared(&self) -> Self {
        Self::default()
    }

    /// Number of filter groups that deviate from the default.
    pub fn active_count(&self) -> usize {
        let platforms = usize::from(self.platforms.len() < Platform::ALL.len());
        let status = usize::from(!self.show_upcoming || !self.show_past);
        let bookmarks = usize::from(self.bookmarked_only);
        platforms + status + bookmarks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_active_filters() {
        let filters = FilterOptions::default();
        assert_eq!(filters.platforms.len(), 3);
        assert_eq!(filters.active_count(), 0);
    }

    #[test]
    fn test_active_count_groups_status_flags() {
        let filters = FilterOptions {
            show_upcoming: false,
            show_past: false,
            bookmarked_only: true,
            ..FilterOptions::default()
        }
        .toggle_platform(Platform::LeetCode);

        assert_eq!(filters.active_count(), 3);
    }

    #[test]
    fn test_toggle_platform_twice_restores() {
        let filters = FilterOptions::default();
        let toggled = filters.clone().toggle_platform(Platform::CodeChef);
        assert!(!toggled.platforms.contains(&Platform::CodeChef));
        assert_eq!(toggled.toggle_platform(Platform::CodeChef), filters);
    }

    #[test]
    fn test_cleared_resets_everything() {
        let filters = FilterOptions {
            bookmarked_only: true,
            ..FilterOptions::default()
        }
        .with_platforms([Platform::Codeforces]);
        assert_eq!(filters.cleared(), FilterOptions::default());
    }
}
