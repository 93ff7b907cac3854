//! First-run seed data.
//!
//! A fresh garden gets six plots `A1..A6` and the five stock profiles.
//! Seeding only ever adds: existing plots and profiles are never touched.

use crate::garden::{Garden, Plot, Profile};

/// Number of plots created when the garden has none.
pub const DEFAULT_PLOT_COUNT: usize = 6;

/// `(id, name, cover_days, uncover_days, watering_frequency_days)`
const DEFAULT_PROFILES: [(&str, &str, u32, u32, u32); 5] = [
    ("rukola", "Rukola", 3, 8, 1),
    ("koriandr", "Koriandr", 6, 19, 1),
    ("redkvicka", "Ředkvička", 4, 10, 1),
    ("hrasek", "Hrášek", 5, 16, 1),
    ("horcice", "Hořčice", 3, 11, 1),
];

pub fn default_plots() -> Vec<Plot> {
    (1..=DEFAULT_PLOT_COUNT)
        .map(|i| Plot {
            id: format!("A{i}"),
            label: format!("Plot A{i}"),
        })
        .collect()
}

pub fn default_profiles() -> Vec<Profile> {
    DEFAULT_PROFILES
        .iter()
        .map(|&(id, name, cover_days, uncover_days, watering_frequency_days)| Profile {
            id: id.to_string(),
            name: name.to_string(),
            cover_days,
            uncover_days,
            watering_frequency_days,
            notes: String::new(),
        })
        .collect()
}

/// What [`seed_defaults`] added.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SeedReport {
    pub plots_added: Vec<String>,
    pub profiles_added: Vec<String>,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.plots_added.is_empty() && self.profiles_added.is_empty()
    }
}

/// Add default plots (only when there are none) and any missing default
/// profiles.
pub fn seed_defaults(garden: &mut Garden) -> SeedReport {
    let mut report = SeedReport::default();

    if garden.plots.is_empty() {
        for plot in default_plots() {
            report.plots_added.push(plot.id.clone());
            garden.plots.push(plot);
        }
    }

    for profile in default_profiles() {
        if garden.profile(&profile.id).is_none() {
            report.profiles_added.push(profile.id.clone());
            garden.profiles.push(profile);
        }
    }

    report
}
