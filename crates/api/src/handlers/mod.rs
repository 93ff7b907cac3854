//! HTTP handlers for garden actions and read views.

pub mod calendar;
pub mod garden;
pub mod plots;
pub mod profiles;

use chrono::{Local, NaiveDate};

/// Today's date on the local clock; phases and calendars are day-based.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
