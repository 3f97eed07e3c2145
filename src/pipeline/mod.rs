//! Everything between fetched contests and what the user sees.
//!
//! - `filter`: filter and sort engine for the public listing
//! - `admin`: past contests with solution link curation
//! - `state`: application state, actions and the controller
//! - `refresh`: periodic countdown recomputation

pub mod admin;
pub mod filter;
pub mod refresh;
pub mod state;

pub use admin::{AdminRow, AdminView, PlatformSelection, SolutionForm};
pub use filter::{ContestCard, build_view, compare, passes, sort_contests};
pub use refresh::{CountdownLabel, CountdownRefresher, RefresherHandle};
pub use state::{Action, AppState, Controller, Notification, NotificationLevel};
