//! Plot phase derived from a deployment's dates.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::garden::Deployment;

/// Display state of a plot on a given day. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Covered,
    Uncovered,
    Mature,
}

impl Phase {
    /// Phase of a plot holding `deployment` on `today`.
    pub fn on(deployment: Option<&Deployment>, today: NaiveDate) -> Self {
        match deployment {
            None => Phase::Idle,
            Some(d) if today < d.cover_end => Phase::Covered,
            Some(d) if today < d.harvest_date => Phase::Uncovered,
            Some(_) => Phase::Mature,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Covered => "covered",
            Phase::Uncovered => "uncovered",
            Phase::Mature => "mature",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
