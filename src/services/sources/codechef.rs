// src/services/sources/codechef.rs

//! CodeChef contest source.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::{ContestSource, collect_normalized};
use crate::error::{AppError, Result};
use crate::models::{Contest, Platform};
use crate::utils::http::fetch_json;

#[derive(Debug, Deserialize)]
struct ContestListResponse {
    #[serde(default)]
    future_contests: Option<Vec<RawContest>>,
    #[serde(default)]
    present_contests: Option<Vec<RawContest>>,
    #[serde(default)]
    past_contests: Option<Vec<RawContest>>,
}

#[derive(Debug, Deserialize)]
struct RawContest {
    #[serde(alias = "code")]
    contest_code: String,
    #[serde(alias = "name")]
    contest_name: String,
    #[serde(rename = "contest_start_date_iso", alias = "start_date")]
    start_date: String,
    #[serde(rename = "contest_end_date_iso", alias = "end_date")]
    end_date: String,
}

/// Reads the contest lists published by CodeChef.
pub struct CodeChefSource {
    client: Client,
    endpoint: String,
}

impl CodeChefSource {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn normalize(body: ContestListResponse) -> Result<Vec<Contest>> {
        if body.future_contests.is_none()
            && body.present_contests.is_none()
            && body.past_contests.is_none()
        {
            return Err(AppError::source_failure(
                Platform::CodeChef,
                "response has no contest lists",
            ));
        }

        let raw = body
            .future_contests
            .into_iter()
            .chain(body.present_contests)
            .chain(body.past_contests)
            .flatten();

        let items = raw.map(|c| {
            let start = parse_date(&c.start_date)?;
            let end = parse_date(&c.end_date)?;
            let url = format!("https://www.codechef.com/{}", c.contest_code);
            Contest::from_start_and_end(
                Platform::CodeChef,
                &c.contest_code,
                c.contest_name,
                url,
                start,
                end,
            )
        });

        Ok(collect_normalized(Platform::CodeChef, items))
    }
}

/// Parse an RFC 3339 date, or a bare `YYYY-MM-DD HH:MM:SS` taken as UTC.
fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| AppError::source_failure(Platform::CodeChef, format!("bad date '{raw}': {e}")))
}

#[async_trait]
impl ContestSource for CodeChefSource {
    fn platform(&self) -> Platform {
        Platform::CodeChef
    }

    async fn fetch(&self) -> Result<Vec<Contest>> {
        let body: ContestListResponse = fetch_json(self.client.get(&self.endpoint)).await?;
        Self::normalize(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(json: &str) -> Result<Vec<Contest>> {
        CodeChefSource::normalize(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_normalize_iso_lists_in_order() {
        let contests = parse(
            r#"{
                "status": "success",
                "future_contests": [
                    {"contest_code": "START170", "contest_name": "Starters 170",
                     "contest_start_date": "22 Jan 2025  20:00:00",
                     "contest_start_date_iso": "2025-01-22T20:00:00+05:30",
                     "contest_end_date_iso": "2025-01-22T22:00:00+05:30"}
                ],
                "present_contests": [],
                "past_contests": [
                    {"contest_code": "START169", "contest_name": "Starters 169",
                     "contest_start_date_iso": "2025-01-15T20:00:00+05:30",
                     "contest_end_date_iso": "2025-01-15T22:00:00+05:30"}
                ]
            }"#,
        )
        .unwrap();

        let ids: Vec<_> = contests.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["cc-START170", "cc-START169"]);

        let first = &contests[0];
        assert_eq!(first.url, "https://www.codechef.com/START170");
        assert_eq!(
            first.start_time,
            Utc.with_ymd_and_hms(2025, 1, 22, 14, 30, 0).unwrap()
        );
        assert_eq!(first.duration, 7200);
    }

    #[test]
    fn test_legacy_keys_and_plain_dates() {
        let contests = parse(
            r#"{
                "present_contests": [
                    {"code": "LONG1", "name": "Long Challenge",
                     "start_date": "2025-02-01 15:00:00", "end_date": "2025-02-11 15:00:00"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(contests[0].id, "cc-LONG1");
        assert_eq!(contests[0].duration, 10 * 24 * 3600);
    }

    #[test]
    fn test_skips_unparseable_and_inverted_windows() {
        let contests = parse(
            r#"{
                "past_contests": [
                    {"code": "BAD", "name": "Bad", "start_date": "soon", "end_date": "later"},
                    {"code": "INV", "name": "Inverted",
                     "start_date": "2025-02-02 15:00:00", "end_date": "2025-02-01 15:00:00"},
                    {"code": "OK", "name": "Ok",
                     "start_date": "2025-02-01 15:00:00", "end_date": "2025-02-01 17:00:00"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(contests.len(), 1);
        assert_eq!(contests[0].id, "cc-OK");
    }

    #[test]
    fn test_missing_lists_is_error() {
        assert!(parse(r#"{"status": "error"}"#).is_err());
    }
}
