// src/models/mod.rs

//! Domain models for the contest aggregator.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod bookmarks;
mod config;
mod contest;
mod filter;

// Re-export all public types
pub use bookmarks::BookmarkSet;
pub use config::{AdminConfig, Config, FetcherConfig, RefreshConfig, SourcesConfig, StorageConfig};
pub use contest::{Contest, ContestStatus, Platform};
pub use filter::FilterOptions;
