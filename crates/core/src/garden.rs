//! The garden aggregate: profiles, plots and deployments.
//!
//! [`Garden`] is persisted as one JSON document. Decoding ignores keys it
//! does not know and fills defaults for optional fields, so documents
//! written by newer versions still load.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Watering interval used when a profile does not specify one.
pub const DEFAULT_WATERING_FREQUENCY_DAYS: u32 = 1;

fn default_watering_frequency() -> u32 {
    DEFAULT_WATERING_FREQUENCY_DAYS
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A reusable growing recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    /// Days the tray stays covered after planting.
    pub cover_days: u32,
    /// Days from uncovering to harvest.
    pub uncover_days: u32,
    #[serde(default = "default_watering_frequency")]
    pub watering_frequency_days: u32,
    #[serde(default)]
    pub notes: String,
}

/// A physical growing location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plot {
    pub id: String,
    pub label: String,
}

/// A profile planted on a plot.
///
/// `plant_name`, `watering_every_days` and `notes` are copied from the
/// profile at deploy time and do not follow later profile edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub plot_id: String,
    pub sticker: String,
    pub plant_id: String,
    pub plant_name: String,
    pub start_date: NaiveDate,
    pub cover_end: NaiveDate,
    pub harvest_date: NaiveDate,
    pub watering_every_days: u32,
    pub next_watering_due: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

// ---------------------------------------------------------------------------
// Garden
// ---------------------------------------------------------------------------

/// The whole persisted state. Plot order is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Garden {
    #[serde(default)]
    pub plots: Vec<Plot>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub deployments: Vec<Deployment>,
}

impl Garden {
    /// Decode a garden from its generic document form.
    ///
    /// `null` decodes to an empty garden. Unknown keys are dropped; a record
    /// missing a required field or holding a value of the wrong type is a
    /// validation error.
    pub fn from_document(raw: &Value) -> Result<Self, CoreError> {
        match raw {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => Garden::deserialize(raw)
                .map_err(|e| CoreError::Validation(format!("Malformed garden document: {e}"))),
            other => Err(CoreError::Validation(format!(
                "Garden document must be an object, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Encode the garden into its generic document form.
    pub fn to_document(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    // -- lookups ------------------------------------------------------------

    pub fn plot(&self, id: &str) -> Option<&Plot> {
        self.plots.iter().find(|p| p.id == id)
    }

    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn deployment_for(&self, plot_id: &str) -> Option<&Deployment> {
        self.deployments.iter().find(|d| d.plot_id == plot_id)
    }

    pub fn deployment_for_mut(&mut self, plot_id: &str) -> Option<&mut Deployment> {
        self.deployments.iter_mut().find(|d| d.plot_id == plot_id)
    }

    // -- mutations ----------------------------------------------------------

    /// Replace the profile with the same id in place, or append it.
    ///
    /// Returns `true` when an existing profile was replaced.
    pub fn upsert_profile(&mut self, profile: Profile) -> bool {
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => {
                *existing = profile;
                true
            }
            None => {
                self.profiles.push(profile);
                false
            }
        }
    }

    /// Returns `true` if a profile was removed.
    pub fn remove_profile(&mut self, id: &str) -> bool {
        let before = self.profiles.len();
        self.profiles.retain(|p| p.id != id);
        self.profiles.len() != before
    }

    /// Append a plot unless one with the same id exists.
    ///
    /// Returns `true` if the plot was added.
    pub fn add_plot(&mut self, plot: Plot) -> bool {
        if self.plot(&plot.id).is_some() {
            return false;
        }
        self.plots.push(plot);
        true
    }

    /// Remove a plot together with its deployment.
    ///
    /// Returns `true` if a plot was removed.
    pub fn remove_plot(&mut self, id: &str) -> bool {
        let before = self.plots.len();
        self.plots.retain(|p| p.id != id);
        self.deployments.retain(|d| d.plot_id != id);
        self.plots.len() != before
    }

    /// Set the label of every plot with the given id.
    ///
    /// Returns the number of plots renamed.
    pub fn rename_plot(&mut self, id: &str, label: &str) -> usize {
        let mut renamed = 0;
        for plot in self.plots.iter_mut().filter(|p| p.id == id) {
            plot.label = label.to_string();
            renamed += 1;
        }
        renamed
    }

    /// Install a deployment, dropping any earlier one on the same plot.
    pub fn replace_deployment(&mut self, deployment: Deployment) {
        self.deployments.retain(|d| d.plot_id != deployment.plot_id);
        self.deployments.push(deployment);
    }

    /// Remove and return the deployment on a plot, if any.
    pub fn remove_deployment(&mut self, plot_id: &str) -> Option<Deployment> {
        let index = self.deployments.iter().position(|d| d.plot_id == plot_id)?;
        Some(self.deployments.remove(index))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
