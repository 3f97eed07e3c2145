// src/utils/url.rs

//! URL checks for solution video links.

use regex::Regex;

use crate::error::{AppError, Result};

/// Matches video links of the shape `[http[s]://][www.]<host>/<path>`.
#[derive(Debug, Clone)]
pub struct VideoUrlMatcher {
    pattern: Regex,
}

impl VideoUrlMatcher {
    /// Build a matcher accepting the given hosts.
    pub fn new<S: AsRef<str>>(hosts: &[S]) -> Result<Self> {
        let alternatives: Vec<String> = hosts
            .iter()
            .map(|h| h.as_ref().trim())
            .filter(|h| !h.is_empty())
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return Err(AppError::config("No video hosts configured"));
        }

        let source = format!(r"^(https?://)?(www\.)?({})/.+$", alternatives.join("|"));
        let pattern = Regex::new(&source)
            .map_err(|e| AppError::config(format!("Invalid video host pattern: {e}")))?;
        Ok(Self { pattern })
    }

    pub fn is_match(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }
}
