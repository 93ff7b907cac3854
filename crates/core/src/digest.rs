//! Message bodies for the daily summary and the watering reminder.

use chrono::NaiveDate;

use crate::garden::Deployment;

/// Title used for every notification sent by the scheduled jobs.
pub const NOTIFICATION_TITLE: &str = "Microgreens";

/// Body sent when nothing changes phase today.
pub const NO_PHASE_CHANGES: &str = "No phase changes today.";

fn plot_tag(d: &Deployment) -> String {
    format!("{} ({})", d.plot_id, d.plant_name)
}

/// Compose the daily summary for `today`.
///
/// Lists deployments uncovering today, then deployments ready to harvest.
/// Always returns a message.
pub fn daily_summary(deployments: &[Deployment], today: NaiveDate) -> String {
    let mut phase_changes = Vec::new();
    let mut harvests = Vec::new();

    for d in deployments {
        if d.cover_end == today {
            phase_changes.push(format!("{} → uncover", plot_tag(d)));
        }
        if d.harvest_date == today {
            harvests.push(format!("{} harvest", plot_tag(d)));
        }
    }

    let mut lines = Vec::new();
    if !phase_changes.is_empty() {
        lines.push(format!("Phase changes today: {}", phase_changes.join(", ")));
    }
    if !harvests.is_empty() {
        lines.push(format!("Ready to harvest: {}", harvests.join(", ")));
    }
    if lines.is_empty() {
        return NO_PHASE_CHANGES.to_string();
    }
    lines.join("\n")
}

/// Deployments whose next watering is due on or before `today`.
pub fn due_for_watering(deployments: &[Deployment], today: NaiveDate) -> Vec<&Deployment> {
    deployments
        .iter()
        .filter(|d| d.next_watering_due <= today)
        .collect()
}

/// Compose the watering reminder for a non-empty set of due deployments.
pub fn watering_message(due: &[&Deployment]) -> String {
    let plots: Vec<String> = due.iter().map(|d| plot_tag(d)).collect();
    format!("Water today: {}", plots.join(", "))
}
