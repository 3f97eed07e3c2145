// src/pipeline/refresh.rs

//! Periodic countdown refresh.
//!
//! A background task recomputes the countdown labels of upcoming contests on
//! a fixed period. It stops on its own once no target is upcoming any more,
//! or when its handle is stopped or dropped.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::utils::time;

/// Source of the current instant.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// One recomputed countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownLabel {
    pub contest_id: String,
    pub label: String,
}

impl CountdownLabel {
    pub fn is_ended(&self) -> bool {
        self.label == time::ENDED
    }
}

/// Recompute countdown labels for `targets` at `now`.
pub fn countdowns(targets: &[(String, DateTime<Utc>)], now: DateTime<Utc>) -> Vec<CountdownLabel> {
    targets
        .iter()
        .map(|(id, start)| CountdownLabel {
            contest_id: id.clone(),
            label: time::time_remaining(*start, now),
        })
        .collect()
}

pub struct CountdownRefresher {
    period: Duration,
    clock: Clock,
}

impl CountdownRefresher {
    pub fn new(period: Duration) -> Self {
        Self::with_clock(period, Arc::new(Utc::now))
    }

    pub fn with_clock(period: Duration, clock: Clock) -> Self {
        Self { period, clock }
    }

    /// Spawn the refresh loop.
    ///
    /// `targets` pairs contest IDs with their start instants. `on_tick`
    /// receives the full set of labels after every period. The first tick
    /// fires one period after the call.
    pub fn start<F>(&self, targets: Vec<(String, DateTime<Utc>)>, mut on_tick: F) -> RefresherHandle
    where
        F: FnMut(Vec<CountdownLabel>) + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let clock = Arc::clone(&self.clock);
        let period = self.period;

        let task = tokio::spawn(async move {
            let mut upcoming = targets.iter().any(|(_, start)| *start > clock());
            if !upcoming {
                log::debug!("No upcoming contests, countdown refresh not started");
                return;
            }

            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            while upcoming {
                tokio::select! {
                    _ = token.cancelled() => {
                        log::debug!("Countdown refresh cancelled");
                        return;
                    }
                    _ = ticker.tick() => {
                        let labels = countdowns(&targets, clock());
                        upcoming = labels.iter().any(|l| !l.is_ended());
                        on_tick(labels);
                    }
                }
            }
            log::debug!("All tracked contests started, countdown refresh finished");
        });

        RefresherHandle {
            cancel,
            task: Some(task),
        }
    }
}

/// Owner of a running refresh loop. Dropping it cancels the loop.
pub struct RefresherHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RefresherHandle {
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Cancel the loop and wait for it to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                log::warn!("Countdown refresh task failed: {e}");
            }
        }
    }
}

impl Drop for RefresherHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
