//! Read-only views of the garden for presentation consumers.
//!
//! The calendar view turns each deployment into an all-day event spanning
//! planting to harvest. The plot status view reports the derived phase and
//! the deployment attributes for one plot.

use chrono::NaiveDate;
use serde::Serialize;

use crate::garden::{Deployment, Garden};
use crate::phase::Phase;

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

/// An all-day calendar event covering one deployment.
///
/// `end` is exclusive: the day after harvest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub plot_id: String,
    pub summary: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub description: String,
}

impl CalendarEvent {
    fn from_deployment(d: &Deployment, title_prefix: &str) -> Self {
        let mut description = format!(
            "Start: {}\nCovered until: {}\nHarvest: {}\nSticker: {}\n{}",
            d.start_date, d.cover_end, d.harvest_date, d.sticker, d.notes
        );
        description.truncate(description.trim_end().len());

        Self {
            plot_id: d.plot_id.clone(),
            summary: format!("{title_prefix} {} @ {}", d.plant_name, d.plot_id)
                .trim_start()
                .to_string(),
            start: d.start_date,
            end: d.harvest_date.succ_opt().unwrap_or(d.harvest_date),
            description,
        }
    }
}

/// Events overlapping the half-open range `[range_start, range_end)`.
pub fn calendar_events(
    garden: &Garden,
    title_prefix: &str,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Vec<CalendarEvent> {
    garden
        .deployments
        .iter()
        .map(|d| CalendarEvent::from_deployment(d, title_prefix))
        .filter(|e| e.end > range_start && e.start < range_end)
        .collect()
}

/// The earliest-starting event that has not yet ended on `today`.
pub fn next_calendar_event(
    garden: &Garden,
    title_prefix: &str,
    today: NaiveDate,
) -> Option<CalendarEvent> {
    garden
        .deployments
        .iter()
        .map(|d| CalendarEvent::from_deployment(d, title_prefix))
        .filter(|e| e.end > today)
        .min_by_key(|e| e.start)
}

// ---------------------------------------------------------------------------
// Plot status
// ---------------------------------------------------------------------------

/// Current state of one plot. Deployment fields are `None` when idle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotStatus {
    pub plot_id: String,
    pub label: String,
    pub phase: Phase,
    pub sticker: Option<String>,
    pub plant_id: Option<String>,
    pub plant_name: Option<String>,
    pub days_since_planting: i64,
    pub cover_end: Option<NaiveDate>,
    pub harvest_date: Option<NaiveDate>,
    pub next_watering_due: Option<NaiveDate>,
}

/// Status of the plot `plot_id`, or `None` if the plot does not exist.
pub fn plot_status(garden: &Garden, plot_id: &str, today: NaiveDate) -> Option<PlotStatus> {
    let plot = garden.plot(plot_id)?;
    let deployment = garden.deployment_for(plot_id);

    Some(PlotStatus {
        plot_id: plot.id.clone(),
        label: plot.label.clone(),
        phase: Phase::on(deployment, today),
        sticker: deployment.map(|d| d.sticker.clone()),
        plant_id: deployment.map(|d| d.plant_id.clone()),
        plant_name: deployment.map(|d| d.plant_name.clone()),
        days_since_planting: deployment
            .map(|d| (today - d.start_date).num_days().max(0))
            .unwrap_or(0),
        cover_end: deployment.map(|d| d.cover_end),
        harvest_date: deployment.map(|d| d.harvest_date),
        next_watering_due: deployment.map(|d| d.next_watering_due),
    })
}

/// Status of every plot, in plot order.
pub fn plot_statuses(garden: &Garden, today: NaiveDate) -> Vec<PlotStatus> {
    garden
        .plots
        .iter()
        .filter_map(|p| plot_status(garden, &p.id, today))
        .collect()
}
