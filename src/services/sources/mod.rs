//! Contest sources, one per platform.
//!
//! Each source fetches the provider-specific payload and normalizes it into
//! [`Contest`] values. Failures are returned to the caller; soft-failing is
//! the aggregator's job.

mod codechef;
mod codeforces;
mod leetcode;
mod mock;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Contest, Platform};

pub use codechef::CodeChefSource;
pub use codeforces::CodeforcesSource;
pub use leetcode::LeetCodeSource;
pub use mock::MockSource;

/// A provider of contests for one platform.
#[async_trait]
pub trait ContestSource: Send + Sync {
    /// Platform this source serves.
    fn platform(&self) -> Platform;

    /// Fetch and normalize all contests the provider currently lists.
    async fn fetch(&self) -> Result<Vec<Contest>>;
}

/// Keep the contests that normalized cleanly, logging the rest.
fn collect_normalized<I>(platform: Platform, items: I) -> Vec<Contest>
where
    I: IntoIterator<Item = Result<Contest>>,
{
    items
        .into_iter()
        .filter_map(|item| match item {
            Ok(contest) => Some(contest),
            Err(e) => {
                log::warn!("Skipping malformed {platform} contest: {e}");
                None
            }
        })
        .collect()
}
