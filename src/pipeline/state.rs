// src/pipeline/state.rs

//! Application state and its transitions.
//!
//! `AppState` is only ever replaced as a whole: `reduce` consumes the old
//! state and returns the new one. The `Controller` owns the current state
//! and persists bookmarks after every bookmark change.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{BookmarkSet, Contest, FilterOptions, Platform};
use crate::pipeline::filter::{ContestCard, build_view, sort_contests};
use crate::services::ContestAggregator;
use crate::storage::BookmarkStorage;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Dismissable message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }

    fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// State transitions.
#[derive(Debug, Clone)]
pub enum Action {
    ContestsLoaded(Vec<Contest>),
    LoadFailed(String),
    SetFilters(FilterOptions),
    TogglePlatform(Platform),
    ClearFilters,
    ToggleBookmark(String),
    DismissNotification(usize),
}

/// Everything the listing view is derived from.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub contests: Vec<Contest>,
    pub filters: FilterOptions,
    pub bookmarks: BookmarkSet,
    pub notifications: Vec<Notification>,
    pub loaded: bool,
}

impl AppState {
    pub fn with_bookmarks(bookmarks: BookmarkSet) -> Self {
        Self {
            bookmarks,
            ..Self::default()
        }
    }

    /// Apply one action, producing the next state.
    pub fn reduce(mut self, action: Action, now: DateTime<Utc>) -> Self {
        match action {
            Action::ContestsLoaded(contests) => {
                self.contests = sort_contests(contests, now);
                self.loaded = true;
                self.notifications.push(Notification::info(
                    "Contests Loaded",
                    format!("{} contests loaded successfully.", self.contests.len()),
                ));
            }
            Action::LoadFailed(reason) => {
                log::error!("Failed to fetch contests: {reason}");
                self.loaded = true;
                self.notifications.push(Notification::error(
                    "Error",
                    "Failed to load contests. Please try again later.",
                ));
            }
            Action::SetFilters(filters) => self.filters = filters,
            Action::TogglePlatform(platform) => {
                self.filters = self.filters.toggle_platform(platform);
            }
            Action::ClearFilters => self.filters = self.filters.cleared(),
            Action::ToggleBookmark(id) => {
                let notification = if self.bookmarks.toggle(&id) {
                    Notification::info("Contest Bookmarked", "Contest added to your bookmarks.")
                } else {
                    Notification::info("Bookmark Removed", "Contest removed from your bookmarks.")
                };
                self.notifications.push(notification);
            }
            Action::DismissNotification(index) => {
                if index < self.notifications.len() {
                    self.notifications.remove(index);
                }
            }
        }
        self
    }

    /// Derived listing for `now`.
    pub fn view(&self, now: DateTime<Utc>) -> Vec<ContestCard> {
        build_view(&self.contests, &self.filters, &self.bookmarks, now)
    }
}

/// Owns the application state and its bookmark storage.
pub struct Controller<S: BookmarkStorage> {
    state: AppState,
    storage: S,
}

impl<S: BookmarkStorage> Controller<S> {
    /// Read the bookmark slot once and start with an empty collection.
    pub async fn start(storage: S) -> Result<Self> {
        let bookmarks = storage.load_bookmarks().await?;
        log::debug!("Loaded {} bookmarks", bookmarks.len());
        Ok(Self {
            state: AppState::with_bookmarks(bookmarks),
            storage,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply an action and persist bookmarks if they changed.
    ///
    /// The new state is only committed once the bookmark set has been
    /// saved. A failed save leaves the previous state in place.
    pub async fn dispatch(&mut self, action: Action, now: DateTime<Utc>) -> Result<()> {
        let next = self.state.clone().reduce(action, now);

        if next.bookmarks != self.state.bookmarks {
            self.storage.save_bookmarks(&next.bookmarks).await?;
        }
        self.state = next;
        Ok(())
    }

    /// Run one aggregation and record the outcome.
    ///
    /// Source failures are absorbed by the aggregator. Only a failure of the
    /// aggregation task itself turns into a `LoadFailed` notification, and
    /// the previously held contests are kept in that case.
    pub async fn load(&mut self, aggregator: Arc<ContestAggregator>) -> Result<()> {
        let task = tokio::spawn(async move { aggregator.fetch_all_contests().await });
        let outcome = task.await.map_err(|e| AppError::Aggregate(e.to_string()));
        let now = Utc::now();

        match outcome {
            Ok(contests) => self.dispatch(Action::ContestsLoaded(contests), now).await,
            Err(e) => self.dispatch(Action::LoadFailed(e.to_string()), now).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::time::Duration as StdDuration;

    struct ReadOnlyStorage;

    #[async_trait]
    impl BookmarkStorage for ReadOnlyStorage {
        async fn load_bookmarks(&self) -> Result<BookmarkSet> {
            Ok(BookmarkSet::new())
        }

        async fn save_bookmarks(&self, _bookmarks: &BookmarkSet) -> Result<()> {
            Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only storage",
            )))
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn contest(id: &str, start_offset_h: i64) -> Contest {
        Contest::from_start_and_duration(
            Platform::Codeforces,
            id,
            id,
            "https://codeforces.com",
            now() + Duration::hours(start_offset_h),
            7200,
        )
        .unwrap()
    }

    #[test]
    fn test_loaded_contests_are_sorted_and_announced() {
        let state = AppState::default().reduce(
            Action::ContestsLoaded(vec![contest("1", -10), contest("2", 5), contest("3", 1)]),
            now(),
        );

        let ids: Vec<_> = state.contests.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["cf-3", "cf-2", "cf-1"]);
        assert!(state.loaded);
        assert_eq!(state.notifications[0].title, "Contests Loaded");
        assert_eq!(state.notifications[0].message, "3 contests loaded successfully.");
    }

    #[test]
    fn test_load_failure_keeps_previous_contests() {
        let state = AppState::default()
            .reduce(Action::ContestsLoaded(vec![contest("1", 1)]), now())
            .reduce(Action::DismissNotification(0), now())
            .reduce(Action::LoadFailed("boom".into()), now());

        assert_eq!(state.contests.len(), 1);
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0].level, NotificationLevel::Error);

        let state = state.reduce(Action::DismissNotification(0), now());
        assert!(state.notifications.is_empty());
        let state = state.reduce(Action::DismissNotification(7), now());
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_filter_actions() {
        let state = AppState::default()
            .reduce(Action::TogglePlatform(Platform::CodeChef), now())
            .reduce(
                Action::SetFilters(FilterOptions {
                    bookmarked_only: true,
                    ..FilterOptions::default()
                }),
                now(),
            );
        assert!(state.filters.bookmarked_only);
        assert_eq!(state.filters.platforms.len(), 3);

        let state = state
            .reduce(Action::TogglePlatform(Platform::CodeChef), now())
            .reduce(Action::ClearFilters, now());
        assert_eq!(state.filters, FilterOptions::default());
    }

    #[test]
    fn test_view_tracks_bookmark_filter() {
        let state = AppState::default()
            .reduce(Action::ContestsLoaded(vec![contest("1", 1), contest("2", 2)]), now())
            .reduce(Action::ToggleBookmark("cf-2".into()), now())
            .reduce(
                Action::SetFilters(FilterOptions {
                    bookmarked_only: true,
                    ..FilterOptions::default()
                }),
                now(),
            );

        let view = state.view(now());
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].contest.id, "cf-2");
        assert!(view[0].bookmarked);
    }

    #[tokio::test]
    async fn test_controller_persists_bookmark_toggles() {
        let storage = MemoryStorage::new(BookmarkSet::from_ids(["cf-9"]));
        let mut controller = Controller::start(storage).await.unwrap();
        assert!(controller.state().bookmarks.contains("cf-9"));

        controller
            .dispatch(Action::ToggleBookmark("cf-1".into()), now())
            .await
            .unwrap();
        controller
            .dispatch(Action::ClearFilters, now())
            .await
            .unwrap();

        assert_eq!(controller.storage.write_count(), 1);
        let saved = controller.storage.load_bookmarks().await.unwrap();
        assert_eq!(saved, BookmarkSet::from_ids(["cf-9", "cf-1"]));

        let titles: Vec<_> = controller
            .state()
            .notifications
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Contest Bookmarked"]);

        controller
            .dispatch(Action::ToggleBookmark("cf-1".into()), now())
            .await
            .unwrap();
        assert_eq!(controller.state().notifications[1].title, "Bookmark Removed");
        assert_eq!(controller.storage.write_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_state() {
        let mut controller = Controller::start(ReadOnlyStorage).await.unwrap();

        let result = controller
            .dispatch(Action::ToggleBookmark("cf-1".into()), now())
            .await;

        assert!(result.is_err());
        assert!(!controller.state().bookmarks.contains("cf-1"));
        assert!(controller.state().notifications.is_empty());

        controller
            .dispatch(Action::TogglePlatform(Platform::LeetCode), now())
            .await
            .unwrap();
        assert_eq!(controller.state().filters.platforms.len(), 2);
    }

    #[tokio::test]
    async fn test_controller_load_from_mock_aggregator() {
        let storage = MemoryStorage::default();
        let mut controller = Controller::start(storage).await.unwrap();
        let aggregator = Arc::new(ContestAggregator::mock(Utc::now(), StdDuration::from_secs(5)));

        controller.load(aggregator).await.unwrap();

        assert_eq!(controller.state().contests.len(), 6);
        assert!(controller.state().loaded);
    }
}
