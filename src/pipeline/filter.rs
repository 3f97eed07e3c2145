// src/pipeline/filter.rs

//! Filter & sort engine for the public contest listing.
//!
//! The view is recomputed from scratch on every call; nothing is cached
//! between calls.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{BookmarkSet, Contest, ContestStatus, FilterOptions};
use crate::utils::time;

/// Whether a contest survives the active filter at `now`.
pub fn passes<F>(contest: &Contest, filters: &FilterOptions, is_bookmarked: F, now: DateTime<Utc>) -> bool
where
    F: Fn(&str) -> bool,
{
    if !filters.platforms.contains(&contest.platform) {
        return false;
    }
    if contest.is_past(now) && !filters.show_past {
        return false;
    }
    if contest.is_upcoming(now) && !filters.show_upcoming {
        return false;
    }
    if filters.bookmarked_only && !is_bookmarked(&contest.id) {
        return false;
    }
    true
}

/// Display order between two contests.
///
/// Upcoming sorts before past, upcoming by start ascending, past by end
/// descending. Any pair involving an ongoing contest is `Equal`.
pub fn compare(a: &Contest, b: &Contest, now: DateTime<Utc>) -> Ordering {
    match (a.status(now), b.status(now)) {
        (ContestStatus::Upcoming, ContestStatus::Past) => Ordering::Less,
        (ContestStatus::Past, ContestStatus::Upcoming) => Ordering::Greater,
        (ContestStatus::Upcoming, ContestStatus::Upcoming) => a.start_time.cmp(&b.start_time),
        (ContestStatus::Past, ContestStatus::Past) => b.end_time.cmp(&a.end_time),
        _ => Ordering::Equal,
    }
}

/// Order contests for display.
///
/// `compare` treats ongoing contests as ties with everything, which is not
/// a total order. Ongoing contests therefore keep their input positions,
/// and the remaining slots are filled with the upcoming and past contests
/// stably sorted by `compare`.
pub fn sort_contests(contests: Vec<Contest>, now: DateTime<Utc>) -> Vec<Contest> {
    let mut slots = Vec::with_capacity(contests.len());
    let mut movable = Vec::new();

    for contest in contests {
        if contest.status(now) == ContestStatus::Ongoing {
            slots.push(Some(contest));
        } else {
            slots.push(None);
            movable.push(contest);
        }
    }

    movable.sort_by(|a, b| compare(a, b, now));
    let mut movable = movable.into_iter();

    slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| movable.next()))
        .collect()
}

/// A contest prepared for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestCard {
    pub contest: Contest,
    pub status: ContestStatus,
    pub bookmarked: bool,
    /// Countdown label, only for upcoming contests
    pub time_remaining: Option<String>,
    pub start_label: String,
    pub duration_label: String,
}

impl ContestCard {
    fn new(contest: &Contest, bookmarked: bool, now: DateTime<Utc>) -> Self {
        let status = contest.status(now);
        let time_remaining = (status == ContestStatus::Upcoming)
            .then(|| time::time_remaining(contest.start_time, now));

        Self {
            contest: contest.clone(),
            status,
            bookmarked,
            time_remaining,
            start_label: time::format_date(contest.start_time),
            duration_label: time::format_duration(contest.duration),
        }
    }

    /// Whether a solution link should be offered.
    pub fn shows_solution(&self) -> bool {
        self.status == ContestStatus::Past && self.contest.has_solution()
    }
}

/// Build the ordered, filtered listing.
pub fn build_view(
    contests: &[Contest],
    filters: &FilterOptions,
    bookmarks: &BookmarkSet,
    now: DateTime<Utc>,
) -> Vec<ContestCard> {
    let visible: Vec<Contest> = contests
        .iter()
        .filter(|c| passes(c, filters, |id| bookmarks.contains(id), now))
        .cloned()
        .collect();

    sort_contests(visible, now)
        .iter()
        .map(|c| ContestCard::new(c, bookmarks.contains(&c.id), now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn contest(id: &str, platform: Platform, start_offset_h: i64, length_h: i64) -> Contest {
        Contest::from_start_and_duration(
            platform,
            id,
            format!("Contest {id}"),
            format!("https://example.com/{id}"),
            now() + Duration::hours(start_offset_h),
            length_h * 3600,
        )
        .unwrap()
    }

    fn ids(contests: &[Contest]) -> Vec<&str> {
        contests.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_ongoing_survives_status_toggles() {
        let ongoing = contest("1", Platform::Codeforces, -1, 2);
        let filters = FilterOptions {
            show_upcoming: false,
            show_past: false,
            ..FilterOptions::default()
        };

        assert_eq!(ongoing.status(now()), ContestStatus::Ongoing);
        assert!(passes(&ongoing, &filters, |_| false, now()));
    }

    #[test]
    fn test_status_toggles_exclude_only_their_category() {
        let upcoming = contest("1", Platform::Codeforces, 1, 2);
        let past = contest("2", Platform::Codeforces, -5, 2);

        let no_upcoming = FilterOptions {
            show_upcoming: false,
            ..FilterOptions::default()
        };
        assert!(!passes(&upcoming, &no_upcoming, |_| false, now()));
        assert!(passes(&past, &no_upcoming, |_| false, now()));

        let no_past = FilterOptions {
            show_past: false,
            ..FilterOptions::default()
        };
        assert!(passes(&upcoming, &no_past, |_| false, now()));
        assert!(!passes(&past, &no_past, |_| false, now()));
    }

    #[test]
    fn test_platform_and_bookmark_conditions() {
        let cf = contest("1", Platform::Codeforces, 1, 2);
        let lc = contest("2", Platform::LeetCode, 1, 2);
        let filters = FilterOptions::default().with_platforms([Platform::LeetCode]);

        assert!(!passes(&cf, &filters, |_| true, now()));
        assert!(passes(&lc, &filters, |_| false, now()));

        let bookmarked_only = FilterOptions {
            bookmarked_only: true,
            ..FilterOptions::default()
        };
        assert!(passes(&lc, &bookmarked_only, |id| id == "lc-2", now()));
        assert!(!passes(&cf, &bookmarked_only, |id| id == "lc-2", now()));
    }

    #[test]
    fn test_disabling_bookmarked_only_never_removes() {
        let contests = vec![
            contest("1", Platform::Codeforces, 1, 2),
            contest("2", Platform::CodeChef, -5, 2),
            contest("3", Platform::LeetCode, -1, 2),
        ];
        let strict = FilterOptions {
            bookmarked_only: true,
            show_past: false,
            ..FilterOptions::default()
        };
        let relaxed = FilterOptions {
            bookmarked_only: false,
            ..strict.clone()
        };

        for c in &contests {
            for marked in [true, false] {
                if passes(c, &strict, |_| marked, now()) {
                    assert!(passes(c, &relaxed, |_| marked, now()));
                }
            }
        }
    }

    #[test]
    fn test_sort_upcoming_then_past() {
        let sorted = sort_contests(
            vec![
                contest("past-old", Platform::Codeforces, -48, 2),
                contest("soon", Platform::Codeforces, 1, 2),
                contest("past-recent", Platform::CodeChef, -5, 2),
                contest("later", Platform::LeetCode, 24, 2),
            ],
            now(),
        );

        assert_eq!(
            ids(&sorted),
            vec!["cf-soon", "lc-later", "cc-past-recent", "cf-past-old"]
        );
    }

    #[test]
    fn test_sort_keeps_ongoing_positions_and_order() {
        let sorted = sort_contests(
            vec![
                contest("a", Platform::Codeforces, -1, 3),
                contest("p", Platform::Codeforces, -10, 2),
                contest("b", Platform::CodeChef, -2, 4),
                contest("u", Platform::LeetCode, 2, 2),
            ],
            now(),
        );

        assert_eq!(ids(&sorted), vec!["cf-a", "lc-u", "cc-b", "cf-p"]);
    }

    #[test]
    fn test_sort_ties_keep_fetch_order() {
        let sorted = sort_contests(
            vec![
                contest("x", Platform::Codeforces, 3, 2),
                contest("y", Platform::CodeChef, 3, 5),
            ],
            now(),
        );
        assert_eq!(ids(&sorted), vec!["cf-x", "cc-y"]);
    }

    #[test]
    fn test_compare_ongoing_is_tie() {
        let ongoing = contest("o", Platform::Codeforces, -1, 2);
        let upcoming = contest("u", Platform::Codeforces, 1, 2);
        let past = contest("p", Platform::Codeforces, -9, 2);

        assert_eq!(compare(&ongoing, &upcoming, now()), Ordering::Equal);
        assert_eq!(compare(&past, &ongoing, now()), Ordering::Equal);
        assert_eq!(compare(&upcoming, &past, now()), Ordering::Less);
    }

    #[test]
    fn test_build_view_cards() {
        let contests = vec![
            contest("p", Platform::Codeforces, -9, 2)
                .with_solution("https://youtu.be/abc"),
            contest("u", Platform::LeetCode, 1, 2),
        ];
        let bookmarks = BookmarkSet::from_ids(["lc-u"]);

        let view = build_view(&contests, &FilterOptions::default(), &bookmarks, now());

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].contest.id, "lc-u");
        assert!(view[0].bookmarked);
        assert_eq!(view[0].time_remaining.as_deref(), Some("1h 0m"));
        assert_eq!(view[0].duration_label, "2h 0m");
        assert!(view[1].time_remaining.is_none());
        assert!(view[1].shows_solution());
    }

    #[test]
    fn test_build_view_is_pure() {
        let contests = vec![
            contest("1", Platform::Codeforces, 1, 2),
            contest("2", Platform::CodeChef, -1, 2),
        ];
        let filters = FilterOptions::default();
        let bookmarks = BookmarkSet::new();

        let first = build_view(&contests, &filters, &bookmarks, now());
        let second = build_view(&contests, &filters, &bookmarks, now());
        let first_ids: Vec<_> = first.iter().map(|c| &c.contest.id).collect();
        let second_ids: Vec<_> = second.iter().map(|c| &c.contest.id).collect();
        assert_eq!(first_ids, second_ids);
    }
}
