//! Date rules for a deployment's life on a plot.
//!
//! Everything here is pure: the engine in the API crate calls these to
//! validate input and derive dates, then persists the result.

use chrono::{Days, NaiveDate, TimeDelta};

use crate::error::CoreError;
use crate::garden::{Deployment, Profile, DEFAULT_WATERING_FREQUENCY_DAYS};

/// Date format accepted for `start_date` inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Profile input
// ---------------------------------------------------------------------------

/// Unvalidated profile fields as received from an action.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub id: String,
    pub name: String,
    pub cover_days: i64,
    pub uncover_days: i64,
    pub watering_frequency_days: Option<i64>,
    pub notes: Option<String>,
}

impl ProfileInput {
    /// Validate the input and build a [`Profile`].
    ///
    /// `id` and `name` must be non-empty. Day counts must be non-negative
    /// and fit in a `u32`.
    pub fn into_profile(self) -> Result<Profile, CoreError> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return Err(CoreError::Validation("id and name are required".to_string()));
        }

        let cover_days = day_count("cover_days", self.cover_days)?;
        let uncover_days = day_count("uncover_days", self.uncover_days)?;
        let watering_frequency_days = match self.watering_frequency_days {
            Some(days) => day_count("watering_frequency_days", days)?,
            None => DEFAULT_WATERING_FREQUENCY_DAYS,
        };

        Ok(Profile {
            id: self.id,
            name: self.name,
            cover_days,
            uncover_days,
            watering_frequency_days,
            notes: self.notes.unwrap_or_default(),
        })
    }
}

fn day_count(field: &str, value: i64) -> Result<u32, CoreError> {
    u32::try_from(value).map_err(|_| {
        CoreError::Validation(format!(
            "{field} must be a non-negative whole number of days, got {value}"
        ))
    })
}

// ---------------------------------------------------------------------------
// Date arithmetic
// ---------------------------------------------------------------------------

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| CoreError::Validation(format!("Invalid date '{raw}': {e}")))
}

/// The effective watering interval; zero is treated as daily.
pub fn watering_interval(days: u32) -> u32 {
    days.max(1)
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate, CoreError> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| CoreError::Validation(format!("{date} + {days} days is out of range")))
}

fn shift_date(date: NaiveDate, days: i64) -> Result<NaiveDate, CoreError> {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| CoreError::Validation(format!("{date} shifted by {days} days is out of range")))
}

/// Build the deployment for `profile` planted on `plot_id` at `start_date`.
///
/// `sticker` defaults to the plot id.
pub fn plan_deployment(
    plot_id: &str,
    profile: &Profile,
    start_date: NaiveDate,
    sticker: Option<String>,
) -> Result<Deployment, CoreError> {
    let cover_end = add_days(start_date, u64::from(profile.cover_days))?;
    let harvest_date = add_days(
        start_date,
        u64::from(profile.cover_days) + u64::from(profile.uncover_days),
    )?;
    let next_watering_due = add_days(
        start_date,
        u64::from(watering_interval(profile.watering_frequency_days)),
    )?;

    Ok(Deployment {
        plot_id: plot_id.to_string(),
        sticker: sticker
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| plot_id.to_string()),
        plant_id: profile.id.clone(),
        plant_name: profile.name.clone(),
        start_date,
        cover_end,
        harvest_date,
        watering_every_days: profile.watering_frequency_days,
        next_watering_due,
        notes: profile.notes.clone(),
    })
}

/// Move all four dates of a deployment by a signed number of days.
///
/// On error the deployment is left untouched.
pub fn shift_deployment(deployment: &mut Deployment, days: i64) -> Result<(), CoreError> {
    let start_date = shift_date(deployment.start_date, days)?;
    let cover_end = shift_date(deployment.cover_end, days)?;
    let harvest_date = shift_date(deployment.harvest_date, days)?;
    let next_watering_due = shift_date(deployment.next_watering_due, days)?;

    deployment.start_date = start_date;
    deployment.cover_end = cover_end;
    deployment.harvest_date = harvest_date;
    deployment.next_watering_due = next_watering_due;
    Ok(())
}

/// Push the next watering date forward by one interval.
pub fn advance_watering(deployment: &mut Deployment) -> Result<(), CoreError> {
    deployment.next_watering_due = add_days(
        deployment.next_watering_due,
        u64::from(watering_interval(deployment.watering_every_days)),
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
