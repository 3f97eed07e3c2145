// src/services/sources/codeforces.rs

//! Codeforces contest source.

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

use super::{ContestSource, collect_normalized};
use crate::error::{AppError, Result};
use crate::models::{Contest, Platform};
use crate::utils::http::fetch_json;

#[derive(Debug, Deserialize)]
struct ContestListResponse {
    status: String,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    result: Option<Vec<RawContest>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContest {
    id: u64,
    name: String,
    #[serde(default)]
    start_time_seconds: Option<i64>,
    duration_seconds: i64,
}

/// Reads `contest.list` from the Codeforces API.
pub struct CodeforcesSource {
    client: Client,
    endpoint: String,
}

impl CodeforcesSource {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn normalize(body: ContestListResponse) -> Result<Vec<Contest>> {
        let Some(raw) = body.result else {
            let reason = body
                .comment
                .unwrap_or_else(|| format!("no result (status {})", body.status));
            return Err(AppError::source_failure(Platform::Codeforces, reason));
        };

        let items = raw.into_iter().filter_map(|c| {
            // Unscheduled contests have no start time yet.
            let start = DateTime::from_timestamp(c.start_time_seconds?, 0)?;
            let id = c.id.to_string();
            let url = format!("https://codeforces.com/contest/{id}");
            Some(Contest::from_start_and_duration(
                Platform::Codeforces,
                &id,
                c.name,
                url,
                start,
                c.duration_seconds,
            ))
        });

        Ok(collect_normalized(Platform::Codeforces, items))
    }
}

#[async_trait]
impl ContestSource for CodeforcesSource {
    fn platform(&self) -> Platform {
        Platform::Codeforces
    }

    async fn fetch(&self) -> Result<Vec<Contest>> {
        let body: ContestListResponse = fetch_json(self.client.get(&self.endpoint)).await?;
        Self::normalize(body)
    }
}
