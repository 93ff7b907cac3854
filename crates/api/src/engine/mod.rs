//! Garden lifecycle engine.
//!
//! [`GardenEngine`] owns the in-memory [`Garden`] and is the only writer of
//! it. Every mutation runs as one critical section under the garden lock:
//! the change is applied to a working copy, the copy is saved, and only then
//! is it committed to memory and announced on the [`EventBus`]. A failed save
//! therefore leaves memory equal to the last persisted document and publishes
//! nothing.

pub mod jobs;

use std::sync::Arc;

use microgreens_core::error::CoreError;
use microgreens_core::garden::{Deployment, Garden, Plot, Profile};
use microgreens_core::lifecycle::{self, ProfileInput};
use microgreens_core::seed::{self, SeedReport};
use microgreens_events::{EventBus, GardenEvent};
use microgreens_store::{GardenStore, StoreError};
use tokio::sync::Mutex;

pub use jobs::JobReport;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// Change
// ---------------------------------------------------------------------------

/// What a mutation did to the working copy.
enum Change<T> {
    /// Persist and broadcast `DataUpdated`, followed by `extra` if set.
    Commit { value: T, extra: Option<GardenEvent> },
    /// Nothing to persist or announce.
    Skip(T),
}

impl<T> Change<T> {
    fn commit(value: T) -> Self {
        Change::Commit { value, extra: None }
    }
}

// ---------------------------------------------------------------------------
// GardenEngine
// ---------------------------------------------------------------------------

pub struct GardenEngine {
    garden: Mutex<Garden>,
    store: GardenStore,
    bus: Arc<EventBus>,
}

impl GardenEngine {
    /// Load the stored garden, seed defaults where missing, and persist the
    /// seeded state if anything was added.
    pub async fn start(store: GardenStore, bus: Arc<EventBus>) -> Result<Self, EngineError> {
        let mut garden = store.load().await?;

        let report = seed::seed_defaults(&mut garden);
        if !report.is_empty() {
            store.save(&garden).await?;
            tracing::info!(
                plots_added = report.plots_added.len(),
                profiles_added = report.profiles_added.len(),
                "Seeded default plots and profiles"
            );
        }

        tracing::info!(
            plots = garden.plots.len(),
            profiles = garden.profiles.len(),
            deployments = garden.deployments.len(),
            "Garden loaded"
        );

        Ok(Self {
            garden: Mutex::new(garden),
            store,
            bus,
        })
    }

    /// A copy of the current committed garden.
    pub async fn snapshot(&self) -> Garden {
        self.garden.lock().await.clone()
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await.is_ok()
    }

    // -- profiles -----------------------------------------------------------

    /// Create a profile or replace the one with the same id.
    pub async fn upsert_profile(&self, input: ProfileInput) -> Result<Profile, EngineError> {
        let profile = input.into_profile()?;
        tracing::debug!(profile_id = %profile.id, "Upserting profile");

        self.apply(move |garden| {
            let replaced = garden.upsert_profile(profile.clone());
            tracing::info!(profile_id = %profile.id, replaced, "Profile saved");
            Ok(Change::commit(profile))
        })
        .await
    }

    /// Remove a profile. Existing deployments keep their snapshot.
    pub async fn delete_profile(&self, profile_id: &str) -> Result<bool, EngineError> {
        self.apply(|garden| {
            let removed = garden.remove_profile(profile_id);
            tracing::info!(profile_id, removed, "Profile deleted");
            Ok(Change::commit(removed))
        })
        .await
    }

    // -- plots --------------------------------------------------------------

    /// Add a plot. An existing id is left as it is and nothing is saved.
    pub async fn add_plot(&self, plot_id: &str, label: Option<&str>) -> Result<Plot, EngineError> {
        let plot_id = plot_id.trim();
        if plot_id.is_empty() {
            return Err(CoreError::Validation("plot_id is required".into()).into());
        }
        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(plot_id);

        self.apply(|garden| {
            if let Some(existing) = garden.plot(plot_id) {
                tracing::debug!(plot_id, "Plot already exists");
                return Ok(Change::Skip(existing.clone()));
            }
            let plot = Plot {
                id: plot_id.to_string(),
                label: label.to_string(),
            };
            garden.add_plot(plot.clone());
            tracing::info!(plot_id, "Plot added");
            Ok(Change::Commit {
                value: plot,
                extra: Some(GardenEvent::PlotAdded(plot_id.to_string())),
            })
        })
        .await
    }

    /// Remove a plot and any deployment on it.
    pub async fn remove_plot(&self, plot_id: &str) -> Result<bool, EngineError> {
        self.apply(|garden| {
            let removed = garden.remove_plot(plot_id);
            tracing::info!(plot_id, removed, "Plot removed");
            Ok(Change::Commit {
                value: removed,
                extra: Some(GardenEvent::PlotRemoved(plot_id.to_string())),
            })
        })
        .await
    }

    pub async fn rename_plot(&self, plot_id: &str, label: &str) -> Result<Option<Plot>, EngineError> {
        self.apply(|garden| {
            let renamed = garden.rename_plot(plot_id, label);
            tracing::info!(plot_id, renamed, "Plot renamed");
            Ok(Change::commit(garden.plot(plot_id).cloned()))
        })
        .await
    }

    // -- deployments --------------------------------------------------------

    /// Plant `profile_id` on `plot_id`, replacing whatever was there.
    pub async fn deploy(
        &self,
        plot_id: &str,
        profile_id: &str,
        start_date: &str,
        sticker: Option<String>,
    ) -> Result<Deployment, EngineError> {
        tracing::debug!(plot_id, profile_id, start_date, "Deploying profile");

        self.apply(|garden| {
            let profile = garden.profile(profile_id).ok_or_else(|| CoreError::NotFound {
                entity: "Profile",
                id: profile_id.to_string(),
            })?;
            let start = lifecycle::parse_date(start_date)?;
            let deployment = lifecycle::plan_deployment(plot_id, profile, start, sticker)?;

            garden.replace_deployment(deployment.clone());
            tracing::info!(
                plot_id,
                plant_id = %deployment.plant_id,
                harvest_date = %deployment.harvest_date,
                "Deployment created"
            );
            Ok(Change::commit(deployment))
        })
        .await
    }

    /// Clear a plot after harvesting it.
    pub async fn harvest(&self, plot_id: &str) -> Result<Option<Deployment>, EngineError> {
        self.clear_deployment(plot_id, "Plot harvested").await
    }

    /// Clear a plot without harvesting.
    pub async fn unassign(&self, plot_id: &str) -> Result<Option<Deployment>, EngineError> {
        self.clear_deployment(plot_id, "Plot unassigned").await
    }

    async fn clear_deployment(
        &self,
        plot_id: &str,
        log_message: &'static str,
    ) -> Result<Option<Deployment>, EngineError> {
        self.apply(|garden| {
            let removed = garden.remove_deployment(plot_id);
            tracing::info!(plot_id, cleared = removed.is_some(), "{log_message}");
            Ok(Change::commit(removed))
        })
        .await
    }

    /// Move every date of a plot's deployment by `days` (may be negative).
    pub async fn shift_schedule(
        &self,
        plot_id: &str,
        days: i64,
    ) -> Result<Option<Deployment>, EngineError> {
        self.apply(|garden| {
            let shifted = match garden.deployment_for_mut(plot_id) {
                Some(deployment) => {
                    lifecycle::shift_deployment(deployment, days)?;
                    Some(deployment.clone())
                }
                None => None,
            };
            tracing::info!(plot_id, days, shifted = shifted.is_some(), "Schedule shifted");
            Ok(Change::commit(shifted))
        })
        .await
    }

    // -- seeding ------------------------------------------------------------

    /// Re-run first-run seeding. Always saves and broadcasts.
    pub async fn reseed_defaults(&self) -> Result<SeedReport, EngineError> {
        self.apply(|garden| {
            let report = seed::seed_defaults(garden);
            tracing::info!(
                plots_added = report.plots_added.len(),
                profiles_added = report.profiles_added.len(),
                "Defaults reseeded"
            );
            Ok(Change::commit(report))
        })
        .await
    }

    // -- internals ----------------------------------------------------------

    /// Run `mutate` against a working copy and commit it if asked to.
    async fn apply<T, F>(&self, mutate: F) -> Result<T, EngineError>
    where
        F: FnOnce(&mut Garden) -> Result<Change<T>, CoreError>,
    {
        let mut garden = self.garden.lock().await;
        let mut working = garden.clone();

        match mutate(&mut working)? {
            Change::Skip(value) => Ok(value),
            Change::Commit { value, extra } => {
                self.commit(&mut garden, working, extra).await?;
                Ok(value)
            }
        }
    }

    /// Save `working`, install it as the current garden, then announce it.
    ///
    /// The caller must hold the garden lock (`current` is the guarded value).
    async fn commit(
        &self,
        current: &mut Garden,
        working: Garden,
        extra: Option<GardenEvent>,
    ) -> Result<(), StoreError> {
        if let Err(e) = self.store.save(&working).await {
            tracing::error!(error = %e, "Failed to save garden, change discarded");
            return Err(e);
        }
        *current = working;

        self.bus.publish(GardenEvent::DataUpdated);
        if let Some(event) = extra {
            self.bus.publish(event);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
