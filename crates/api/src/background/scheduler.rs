//! Time-of-day triggers for the garden jobs.
//!
//! Three triggers run against the local wall clock:
//!
//! | Trigger   | Default    | Action                                   |
//! |-----------|------------|------------------------------------------|
//! | watering  | `08:00:00` | watering reminder, advances due dates    |
//! | summary   | `18:00:00` | daily summary notification               |
//! | midnight  | `00:00:00` | `DataUpdated` broadcast for a new day    |
//!
//! Each trigger sleeps until the next real instant its wall time comes
//! round, so a day across a DST change is 23 or 25 hours long. All
//! triggers share one parent [`CancellationToken`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone};
use microgreens_core::time_of_day::TimeOfDay;
use microgreens_events::Notifier;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::GardenSettings;
use crate::engine::GardenEngine;

/// How long [`Scheduler::shutdown`] waits for each trigger task.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// next_occurrence
// ---------------------------------------------------------------------------

/// The first instant strictly after `now` whose time of day is `at`.
pub fn next_occurrence(now: NaiveDateTime, at: TimeOfDay) -> NaiveDateTime {
    let today = now.date().and_time(at.as_naive_time());
    if today > now {
        today
    } else {
        today + TimeDelta::days(1)
    }
}

/// The first instant strictly after `now` at which the clock of `now`'s
/// zone reads `at`.
///
/// A wall time repeated by a backward shift resolves to its earlier
/// instant. A wall time skipped by a forward shift resolves to the first
/// minute after the gap.
pub fn next_instant<Tz: TimeZone>(now: &DateTime<Tz>, at: TimeOfDay) -> DateTime<Tz> {
    let zone = now.timezone();
    let mut wall = next_occurrence(now.naive_local(), at);
    loop {
        match zone.from_local_datetime(&wall).earliest() {
            Some(instant) if instant > *now => return instant,
            Some(_) => wall = next_occurrence(wall, at),
            None => wall += TimeDelta::minutes(1),
        }
    }
}

/// Real time to sleep until the next local occurrence of `at`.
fn sleep_duration(at: TimeOfDay) -> Duration {
    let now = Local::now();
    (next_instant(&now, at) - now)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

// ---------------------------------------------------------------------------
// TriggerHandle
// ---------------------------------------------------------------------------

/// A running time-of-day trigger.
pub struct TriggerHandle {
    name: &'static str,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl TriggerHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stop this trigger. It will not fire again.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the trigger task to exit, giving up after `timeout`.
    async fn join(self, timeout: Duration) {
        if tokio::time::timeout(timeout, self.task).await.is_err() {
            tracing::warn!(trigger = self.name, "Trigger did not stop in time");
        }
    }
}

/// Spawn a task that calls `callback` every day at `at` (local time).
///
/// The task stops when `parent` or the returned handle is cancelled.
pub fn on_time<F, Fut>(
    name: &'static str,
    at: TimeOfDay,
    parent: &CancellationToken,
    mut callback: F,
) -> TriggerHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let cancel = parent.child_token();
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        tracing::info!(trigger = name, at = %at, "Trigger started");
        loop {
            let wait = sleep_duration(at);
            tracing::debug!(trigger = name, wait_secs = wait.as_secs(), "Trigger sleeping");

            tokio::select! {
                _ = token.cancelled() => {
                    tracing::info!(trigger = name, "Trigger stopping");
                    break;
                }
                _ = tokio::time::sleep(wait) => {
                    tracing::debug!(trigger = name, "Trigger fired");
                    callback().await;
                }
            }
        }
    });

    TriggerHandle { name, cancel, task }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Owns the garden's daily triggers.
pub struct Scheduler {
    cancel: CancellationToken,
    triggers: Vec<TriggerHandle>,
}

impl Scheduler {
    /// Start the watering, summary, and midnight triggers.
    pub fn start(engine: Arc<GardenEngine>, notifier: Notifier, settings: &GardenSettings) -> Self {
        let cancel = CancellationToken::new();

        let watering = {
            let engine = Arc::clone(&engine);
            let notifier = notifier.clone();
            on_time("watering", settings.watering_time, &cancel, move || {
                let engine = Arc::clone(&engine);
                let notifier = notifier.clone();
                async move {
                    let today = Local::now().date_naive();
                    if let Err(e) = engine.run_watering_reminder(today, &notifier).await {
                        tracing::error!(error = %e, "Watering reminder job failed");
                    }
                }
            })
        };

        let summary = {
            let engine = Arc::clone(&engine);
            on_time("summary", settings.summary_time, &cancel, move || {
                let engine = Arc::clone(&engine);
                let notifier = notifier.clone();
                async move {
                    let today = Local::now().date_naive();
                    engine.run_daily_summary(today, &notifier).await;
                }
            })
        };

        let midnight = on_time("midnight", TimeOfDay::MIDNIGHT, &cancel, move || {
            let engine = Arc::clone(&engine);
            async move { engine.broadcast_refresh() }
        });

        tracing::info!(
            watering_time = %settings.watering_time,
            summary_time = %settings.summary_time,
            "Scheduler started"
        );

        Self {
            cancel,
            triggers: vec![watering, summary, midnight],
        }
    }

    pub fn triggers(&self) -> &[TriggerHandle] {
        &self.triggers
    }

    /// Cancel every trigger and wait for the tasks to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for trigger in self.triggers {
            trigger.join(SHUTDOWN_TIMEOUT).await;
        }
        tracing::info!("Scheduler stopped");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
