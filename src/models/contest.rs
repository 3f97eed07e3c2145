// src/models/contest.rs

//! Contest and platform data structures.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::time;

/// A contest-hosting platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Codeforces,
    CodeChef,
    LeetCode,
}

impl Platform {
    /// Every supported platform, in source registration order.
    pub const ALL: [Platform; 3] = [Platform::Codeforces, Platform::CodeChef, Platform::LeetCode];

    /// Prefix used to namespace contest IDs from this platform.
    pub fn prefix(&self) -> &'static str {
        match self {
            Platform::Codeforces => "cf",
            Platform::CodeChef => "cc",
            Platform::LeetCode => "lc",
        }
    }

    /// Lowercase key used in JSON and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Codeforces => "codeforces",
            Platform::CodeChef => "codechef",
            Platform::LeetCode => "leetcode",
        }
    }

    /// Human-readable platform name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Codeforces => "Codeforces",
            Platform::CodeChef => "CodeChef",
            Platform::LeetCode => "LeetCode",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.key() == lowered || p.prefix() == lowered)
            .ok_or_else(|| AppError::validation(format!("Unknown platform '{s}'")))
    }
}

/// Temporal status of a contest at an evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Upcoming,
    Ongoing,
    Past,
}

impl fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContestStatus::Upcoming => "Upcoming",
            ContestStatus::Ongoing => "Ongoing",
            ContestStatus::Past => "Ended",
        };
        f.write_str(label)
    }
}

/// One scheduled contest on one platform.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    /// Platform-prefixed unique identifier (e.g. `cf-1900`)
    pub id: String,

    /// Display name
    pub name: String,

    /// Hosting platform
    pub platform: Platform,

    /// Canonical contest link
    pub url: String,

    /// Start instant
    pub start_time: DateTime<Utc>,

    /// End instant, never before `start_time`
    pub end_time: DateTime<Utc>,

    /// Length in seconds, always `end_time - start_time`
    pub duration: i64,

    /// Solution walkthrough link, if one was published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_url: Option<String>,
}

impl Contest {
    /// Build a contest from a start instant and a duration in seconds.
    pub fn from_start_and_duration(
        platform: Platform,
        native_id: &str,
        name: impl Into<String>,
        url: impl Into<String>,
        start_time: DateTime<Utc>,
        duration_secs: i64,
    ) -> Result<Self> {
        if duration_secs < 0 {
            return Err(AppError::validation(format!(
                "Contest {native_id} has negative duration {duration_secs}"
            )));
        }
        let end_time = Duration::try_seconds(duration_secs)
            .and_then(|length| start_time.checked_add_signed(length))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Contest {native_id} has out-of-range duration {duration_secs}"
                ))
            })?;
        Ok(Self::assemble(platform, native_id, name, url, start_time, end_time))
    }

    /// Build a contest from start and end instants.
    pub fn from_start_and_end(
        platform: Platform,
        native_id: &str,
        name: impl Into<String>,
        url: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Self> {
        if end_time < start_time {
            return Err(AppError::validation(format!(
                "Contest {native_id} ends before it starts"
            )));
        }
        Ok(Self::assemble(platform, native_id, name, url, start_time, end_time))
    }

    fn assemble(
        platform: Platform,
        native_id: &str,
        name: impl Into<String>,
        url: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("{}-{}", platform.prefix(), native_id),
            name: name.into(),
            platform,
            url: url.into(),
            start_time,
            end_time,
            duration: (end_time - start_time).num_seconds(),
            solution_url: None,
        }
    }

    /// Attach a solution link.
    pub fn with_solution(mut self, url: impl Into<String>) -> Self {
        self.solution_url = Some(url.into());
        self
    }

    /// Whether a non-empty solution link is present.
    pub fn has_solution(&self) -> bool {
        self.solution_url.as_deref().is_some_and(|s| !s.is_empty())
    }

    pub fn status(&self, now: DateTime<Utc>) -> ContestStatus {
        time::classify(self.start_time, self.end_time, now)
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        time::is_upcoming(self.start_time, now)
    }

    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        time::is_past(self.end_time, now)
    }
}
