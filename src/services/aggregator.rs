// src/services/aggregator.rs

//! Contest aggregation service.
//!
//! Fans out to every registered source concurrently, bounds each fetch with
//! a timeout, and joins all of them before merging. A failing source
//! contributes nothing; it never aborts the aggregation.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;

use crate::error::{AppError, Result};
use crate::models::{Config, Contest, Platform};
use crate::services::sources::{
    CodeChefSource, CodeforcesSource, ContestSource, LeetCodeSource, MockSource,
};
use crate::utils::http::create_async_client;

/// Outcome of one source within an aggregation run.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub platform: Platform,
    pub contest_count: usize,
    pub error: Option<String>,
}

impl SourceReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of an aggregation run.
#[derive(Debug, Default)]
pub struct AggregateReport {
    pub contests: Vec<Contest>,
    pub sources: Vec<SourceReport>,
    pub duplicates_dropped: usize,
}

impl AggregateReport {
    pub fn failure_count(&self) -> usize {
        self.sources.iter().filter(|s| !s.succeeded()).count()
    }
}

/// Aggregates contests from all registered sources.
pub struct ContestAggregator {
    sources: Vec<Box<dyn ContestSource>>,
    timeout: Duration,
}

impl ContestAggregator {
    /// Create an aggregator without sources.
    pub fn new(timeout: Duration) -> Self {
        Self {
            sources: Vec::new(),
            timeout,
        }
    }

    /// Register a source. Merge order follows registration order.
    pub fn with_source(mut self, source: impl ContestSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Aggregator over the three live platform APIs.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = create_async_client(&config.fetcher)?;
        let sources = &config.sources;

        Ok(Self::new(Duration::from_secs(config.fetcher.timeout_secs))
            .with_source(CodeforcesSource::new(client.clone(), &sources.codeforces_url))
            .with_source(CodeChefSource::new(client.clone(), &sources.codechef_url))
            .with_source(LeetCodeSource::new(client, &sources.leetcode_url)))
    }

    /// Aggregator over offline sample data anchored at `anchor`.
    pub fn mock(anchor: DateTime<Utc>, timeout: Duration) -> Self {
        MockSource::all(anchor)
            .into_iter()
            .fold(Self::new(timeout), |agg, source| agg.with_source(source))
    }

    /// Fetch and merge contests from every source.
    pub async fn fetch_all_contests(&self) -> Vec<Contest> {
        self.fetch_with_report().await.contests
    }

    /// Fetch and merge contests, keeping per-source outcomes.
    pub async fn fetch_with_report(&self) -> AggregateReport {
        let results = join_all(self.sources.iter().map(|s| self.fetch_source(s.as_ref()))).await;

        let mut report = AggregateReport::default();
        let mut seen = HashSet::new();

        for (source, result) in self.sources.iter().zip(results) {
            let platform = source.platform();
            match result {
                Ok(contests) => {
                    log::info!("Fetched {} contests from {}", contests.len(), platform);
                    report.sources.push(SourceReport {
                        platform,
                        contest_count: contests.len(),
                        error: None,
                    });
                    for contest in contests {
                        if seen.insert(contest.id.clone()) {
                            report.contests.push(contest);
                        } else {
                            log::warn!("Dropping duplicate contest id {}", contest.id);
                            report.duplicates_dropped += 1;
                        }
                    }
                }
                Err(e) => {
                    log::warn!("Error fetching {} contests: {}", platform, e);
                    report.sources.push(SourceReport {
                        platform,
                        contest_count: 0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        report
    }

    async fn fetch_source(&self, source: &dyn ContestSource) -> Result<Vec<Contest>> {
        match tokio::time::timeout(self.timeout, source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout {
                platform: source.platform(),
                secs: self.timeout.as_secs(),
            }),
        }
    }
}
