//! Time-of-day values used by the scheduler configuration.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};

use crate::error::CoreError;

/// A wall-clock time with second precision, parsed from `HH:MM[:SS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(NaiveTime::MIN);

    pub fn new(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    pub fn as_naive_time(self) -> NaiveTime {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    pub fn second(self) -> u32 {
        self.0.second()
    }
}

impl FromStr for TimeOfDay {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("Invalid time of day '{raw}', expected HH:MM[:SS]"));

        let parts: Vec<&str> = raw.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }

        let mut fields = [0u32; 3];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = part.parse().map_err(|_| invalid())?;
        }

        Self::new(fields[0], fields[1], fields[2]).ok_or_else(invalid)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_hours_and_minutes() {
        let t: TimeOfDay = "08:00".parse().unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (8, 0, 0));
    }

    #[test]
    fn parses_seconds_and_single_digit_hour() {
        let t: TimeOfDay = "7:05:30".parse().unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (7, 5, 30));
        assert_eq!(t.to_string(), "07:05:30");
    }

    #[test]
    fn rejects_malformed_values() {
        for raw in ["", "8", "25:00", "12:60", "12:00:61", "noon", "12:00:00:00", "-1:00", "1 2:00"] {
            assert_matches!(raw.parse::<TimeOfDay>(), Err(CoreError::Validation(_)), "{raw}");
        }
    }

    #[test]
    fn midnight_constant() {
        assert_eq!(TimeOfDay::MIDNIGHT, "00:00:00".parse().unwrap());
    }
}
