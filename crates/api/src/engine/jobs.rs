//! Scheduled notification jobs.
//!
//! Each job selects deployments and commits its changes under the garden
//! lock, so an action can never slip in between the two. Delivery happens
//! after the lock is released.

use chrono::NaiveDate;
use microgreens_core::digest::{self, NOTIFICATION_TITLE};
use microgreens_core::lifecycle;
use microgreens_events::{GardenEvent, Notifier};
use serde::Serialize;

use super::{EngineError, GardenEngine};

/// Outcome of one job run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobReport {
    /// Whether a notification was handed to the channel.
    pub sent: bool,
    /// Plots the message was about.
    pub plots: Vec<String>,
}

impl GardenEngine {
    /// Send the evening summary of today's phase changes and harvests.
    ///
    /// Exactly one message is sent per run, even when nothing changes today.
    pub async fn run_daily_summary(&self, today: NaiveDate, notifier: &Notifier) -> JobReport {
        let (plots, message) = {
            let garden = self.garden.lock().await;
            let plots: Vec<String> = garden
                .deployments
                .iter()
                .filter(|d| d.cover_end == today || d.harvest_date == today)
                .map(|d| d.plot_id.clone())
                .collect();
            (plots, digest::daily_summary(&garden.deployments, today))
        };

        let sent = notifier.notify(NOTIFICATION_TITLE, &message).await;
        tracing::info!(%today, sent, "Daily summary job finished");

        self.bus.publish(GardenEvent::DataUpdated);
        JobReport { sent, plots }
    }

    /// Remind about plots due for watering and push their next due date on.
    ///
    /// Nothing happens when no plot is due. The reminder goes out even if
    /// the advanced due dates could not be saved, and due dates advance
    /// even if the reminder could not be delivered.
    pub async fn run_watering_reminder(
        &self,
        today: NaiveDate,
        notifier: &Notifier,
    ) -> Result<JobReport, EngineError> {
        let (plots, message, committed) = {
            let mut garden = self.garden.lock().await;

            let due = digest::due_for_watering(&garden.deployments, today);
            if due.is_empty() {
                tracing::debug!(%today, "No plots due for watering");
                return Ok(JobReport::default());
            }
            let plots: Vec<String> = due.iter().map(|d| d.plot_id.clone()).collect();
            let message = digest::watering_message(&due);

            let mut working = garden.clone();
            for plot_id in &plots {
                if let Some(deployment) = working.deployment_for_mut(plot_id) {
                    lifecycle::advance_watering(deployment)?;
                }
            }
            let committed = self.commit(&mut garden, working, None).await;
            (plots, message, committed)
        };

        let sent = notifier.notify(NOTIFICATION_TITLE, &message).await;
        committed?;

        tracing::info!(%today, sent, due = plots.len(), "Watering reminder job finished");
        Ok(JobReport { sent, plots })
    }

    /// Ask presentation consumers to re-render for a new day.
    pub fn broadcast_refresh(&self) {
        tracing::debug!("Day rolled over, refreshing views");
        self.bus.publish(GardenEvent::DataUpdated);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
