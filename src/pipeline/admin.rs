// src/pipeline/admin.rs

//! Admin curation of solution links for past contests.
//!
//! Changes only live in the in-memory view of the current session; nothing
//! is written back to the contest sources.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{Contest, Platform};
use crate::utils::url::VideoUrlMatcher;

/// A past contest as shown to the admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRow {
    #[serde(flatten)]
    pub contest: Contest,
    pub has_solution: bool,
}

impl From<Contest> for AdminRow {
    fn from(contest: Contest) -> Self {
        Self {
            has_solution: contest.has_solution(),
            contest,
        }
    }
}

/// Platform narrowing for the admin table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlatformSelection {
    #[default]
    All,
    Only(Platform),
}

impl PlatformSelection {
    pub fn includes(&self, platform: Platform) -> bool {
        match self {
            PlatformSelection::All => true,
            PlatformSelection::Only(p) => *p == platform,
        }
    }
}

impl FromStr for PlatformSelection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(PlatformSelection::All)
        } else {
            s.parse().map(PlatformSelection::Only)
        }
    }
}

impl fmt::Display for PlatformSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformSelection::All => f.write_str("All Platforms"),
            PlatformSelection::Only(p) => write!(f, "{p}"),
        }
    }
}

/// Pending solution submission.
///
/// The form is only borrowed by [`AdminView::submit`], so a rejected
/// submission leaves its fields intact for correction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionForm {
    pub contest_id: Option<String>,
    pub url: String,
}

/// Past contests with their solution state.
#[derive(Debug, Clone)]
pub struct AdminView {
    rows: Vec<AdminRow>,
    selection: PlatformSelection,
    matcher: VideoUrlMatcher,
}

impl AdminView {
    /// Keep the contests that ended before `now`, most recent first.
    pub fn from_contests(contests: &[Contest], now: DateTime<Utc>, matcher: VideoUrlMatcher) -> Self {
        let mut rows: Vec<AdminRow> = contests
            .iter()
            .filter(|c| c.is_past(now))
            .cloned()
            .map(AdminRow::from)
            .collect();
        rows.sort_by(|a, b| b.contest.end_time.cmp(&a.contest.end_time));

        Self {
            rows,
            selection: PlatformSelection::All,
            matcher,
        }
    }

    /// Narrow the visible rows to a platform.
    pub fn select(mut self, selection: PlatformSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn selection(&self) -> PlatformSelection {
        self.selection
    }

    /// All past contests regardless of selection.
    pub fn rows(&self) -> &[AdminRow] {
        &self.rows
    }

    /// Rows matching the current platform selection.
    pub fn visible(&self) -> Vec<&AdminRow> {
        self.rows
            .iter()
            .filter(|r| self.selection.includes(r.contest.platform))
            .collect()
    }

    pub fn row(&self, contest_id: &str) -> Option<&AdminRow> {
        self.rows.iter().find(|r| r.contest.id == contest_id)
    }

    /// Submit a form. See [`AdminView::submit_solution`].
    pub fn submit(&self, form: &SolutionForm) -> Result<Self> {
        self.submit_solution(form.contest_id.as_deref(), Some(form.url.as_str()))
    }

    /// Attach a solution link to one past contest.
    ///
    /// Both fields are required and the link must point at an accepted
    /// video host. On success a new view is returned in which only the
    /// named contest changed; on failure `self` is untouched.
    pub fn submit_solution(&self, contest_id: Option<&str>, url: Option<&str>) -> Result<Self> {
        let contest_id = contest_id.map(str::trim).filter(|s| !s.is_empty());
        let url = url.map(str::trim).filter(|s| !s.is_empty());

        let (Some(contest_id), Some(url)) = (contest_id, url) else {
            return Err(AppError::validation(
                "Please select a contest and enter a video link.",
            ));
        };

        if !self.matcher.is_match(url) {
            return Err(AppError::validation(format!(
                "'{url}' is not a valid video link."
            )));
        }

        if self.row(contest_id).is_none() {
            return Err(AppError::validation(format!(
                "No past contest with id '{contest_id}'."
            )));
        }

        let rows = self
            .rows
            .iter()
            .map(|row| {
                if row.contest.id == contest_id {
                    AdminRow {
                        contest: row.contest.clone().with_solution(url),
                        has_solution: true,
                    }
                } else {
                    row.clone()
                }
            })
            .collect();

        log::info!("Solution link attached to {contest_id}");

        Ok(Self {
            rows,
            selection: self.selection,
            matcher: self.matcher.clone(),
        })
    }
}
