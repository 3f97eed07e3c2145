// src/lib.rs

//! Contest Hive Library
//!
//! Aggregates programming contests from Codeforces, CodeChef and LeetCode
//! into one classified, filterable listing with local bookmarks.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
