// src/services/sources/leetcode.rs

//! LeetCode contest source (GraphQL).

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use super::{ContestSource, collect_normalized};
use crate::error::{AppError, Result};
use crate::models::{Contest, Platform};
use crate::utils::http::fetch_json;

const ALL_CONTESTS_QUERY: &str = "query { allContests { title titleSlug startTime duration } }";

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<ContestData>,
}

#[derive(Debug, Deserialize)]
struct ContestData {
    #[serde(rename = "allContests", default)]
    all_contests: Option<Vec<RawContest>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContest {
    title: String,
    title_slug: String,
    start_time: i64,
    duration: i64,
}

/// Queries `allContests` from the LeetCode GraphQL endpoint.
pub struct LeetCodeSource {
    client: Client,
    endpoint: String,
}

impl LeetCodeSource {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn normalize(body: GraphQlResponse) -> Result<Vec<Contest>> {
        let raw = body
            .data
            .and_then(|d| d.all_contests)
            .ok_or_else(|| AppError::source_failure(Platform::LeetCode, "missing data.allContests"))?;

        let items = raw.into_iter().map(|c| {
            let start = DateTime::from_timestamp(c.start_time, 0).ok_or_else(|| {
                AppError::source_failure(
                    Platform::LeetCode,
                    format!("bad start time {} for {}", c.start_time, c.title_slug),
                )
            })?;
            let url = format!("https://leetcode.com/contest/{}", c.title_slug);
            Contest::from_start_and_duration(
                Platform::LeetCode,
                &c.title_slug,
                c.title,
                url,
                start,
                c.duration,
            )
        });

        Ok(collect_normalized(Platform::LeetCode, items))
    }
}

#[async_trait]
impl ContestSource for LeetCodeSource {
    fn platform(&self) -> Platform {
        Platform::LeetCode
    }

    async fn fetch(&self) -> Result<Vec<Contest>> {
        let payload = serde_json::to_vec(&serde_json::json!({ "query": ALL_CONTESTS_QUERY }))?;
        let request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        let body: GraphQlResponse = fetch_json(request).await?;
        Self::normalize(body)
    }
}
