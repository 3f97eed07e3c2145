// src/services/sources/mock.rs

//! Offline sample contests for development and demos.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::ContestSource;
use crate::error::Result;
use crate::models::{Contest, Platform};

/// Serves a fixed pair of contests for one platform, placed relative to an
/// anchor instant: one scheduled ahead, one finished with a solution link.
pub struct MockSource {
    platform: Platform,
    anchor: DateTime<Utc>,
}

impl MockSource {
    pub fn new(platform: Platform, anchor: DateTime<Utc>) -> Self {
        Self { platform, anchor }
    }

    /// One mock source per platform, in registration order.
    pub fn all(anchor: DateTime<Utc>) -> Vec<Self> {
        Platform::ALL
            .into_iter()
            .map(|p| Self::new(p, anchor))
            .collect()
    }

    fn contests(&self) -> Result<Vec<Contest>> {
        let now = self.anchor;
        let minutes = |m: i64| m * 60;

        let contests = match self.platform {
            Platform::Codeforces => vec![
                Contest::from_start_and_duration(
                    Platform::Codeforces,
                    "1",
                    "Codeforces Round #800 (Div. 2)",
                    "https://codeforces.com/contest/1",
                    now + Duration::days(1),
                    minutes(120),
                )?,
                Contest::from_start_and_duration(
                    Platform::Codeforces,
                    "2",
                    "Codeforces Round #799 (Div. 1)",
                    "https://codeforces.com/contest/2",
                    now - Duration::days(7),
                    minutes(150),
                )?
                .with_solution("https://www.youtube.com/watch?v=example1"),
            ],
            Platform::CodeChef => vec![
                Contest::from_start_and_duration(
                    Platform::CodeChef,
                    "1",
                    "CodeChef Long Challenge",
                    "https://www.codechef.com/LONG1",
                    now + Duration::days(7),
                    minutes(10 * 24 * 60),
                )?,
                Contest::from_start_and_duration(
                    Platform::CodeChef,
                    "2",
                    "CodeChef Cook-Off",
                    "https://www.codechef.com/COOK1",
                    now - Duration::days(1),
                    minutes(150),
                )?
                .with_solution("https://www.youtube.com/watch?v=example2"),
            ],
            Platform::LeetCode => vec![
                Contest::from_start_and_duration(
                    Platform::LeetCode,
                    "1",
                    "Weekly Contest 300",
                    "https://leetcode.com/contest/weekly-contest-300",
                    now + Duration::days(3),
                    minutes(90),
                )?,
                Contest::from_start_and_duration(
                    Platform::LeetCode,
                    "2",
                    "Biweekly Contest 75",
                    "https://leetcode.com/contest/biweekly-contest-75",
                    now - Duration::days(7),
                    minutes(90),
                )?
                .with_solution("https://www.youtube.com/watch?v=example3"),
            ],
        };
        Ok(contests)
    }
}

#[async_trait]
impl ContestSource for MockSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch(&self) -> Result<Vec<Contest>> {
        self.contests()
    }
}
