//! Slot roster - the fixed per-night list of pickup start times
//!
//! The roster is configuration, not an algorithmic fact: it comes from the
//! `SLOT_TIMES` env var as a comma-separated `HH:MM` list. The default is
//! ten slots, 17:15 through 19:30 in 15-minute steps.

use chrono::NaiveTime;

use crate::utils::time::{format_slot_time, parse_slot_time};
use crate::utils::{AppError, AppResult};

/// Ordered, deduplicated list of per-night slot start times
#[derive(Debug, Clone)]
pub struct SlotRoster {
    times: Vec<NaiveTime>,
}

impl SlotRoster {
    /// Parse a comma-separated `HH:MM` list
    pub fn parse(spec: &str) -> AppResult<Self> {
        let mut times = Vec::new();
        for part in spec.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            times.push(parse_slot_time(part)?);
        }
        if times.is_empty() {
            return Err(AppError::with_message(
                shared::error::ErrorCode::ConfigError,
                format!("Slot roster '{spec}' contains no times"),
            ));
        }
        times.sort();
        times.dedup();
        Ok(Self { times })
    }

    /// Default evening roster: 17:15–19:30 inclusive, 15-minute steps
    pub fn default_evening() -> Self {
        let times = (0..10)
            .map(|i| {
                let minutes = 17 * 60 + 15 + i * 15;
                NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap()
            })
            .collect();
        Self { times }
    }

    /// Start times in ascending chronological order
    pub fn times(&self) -> &[NaiveTime] {
        &self.times
    }

    /// Start times in wire form (`HH:MM`)
    pub fn time_strings(&self) -> Vec<String> {
        self.times.iter().copied().map(format_slot_time).collect()
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.times.binary_search(&time).is_ok()
    }

    /// The last bookable start time of a night, i.e. the Saturday cutoff
    /// the night selector rolls the weekend over on.
    pub fn last_start(&self) -> NaiveTime {
        *self.times.last().expect("roster is never empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_evening() {
        let roster = SlotRoster::default_evening();
        let times = roster.time_strings();
        assert_eq!(times.len(), 10);
        assert_eq!(times.first().unwrap(), "17:15");
        assert_eq!(times.last().unwrap(), "19:30");
        assert_eq!(times[1], "17:30");
        assert_eq!(roster.last_start(), NaiveTime::from_hms_opt(19, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_sorts_and_dedups() {
        let roster = SlotRoster::parse("19:00, 17:00, 18:00, 17:00").unwrap();
        assert_eq!(roster.time_strings(), vec!["17:00", "18:00", "19:00"]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SlotRoster::parse("17:00, late").is_err());
        assert!(SlotRoster::parse("").is_err());
        assert!(SlotRoster::parse(" , ,").is_err());
    }

    #[test]
    fn test_contains() {
        let roster = SlotRoster::default_evening();
        assert!(roster.contains(NaiveTime::from_hms_opt(18, 0, 0).unwrap()));
        assert!(!roster.contains(NaiveTime::from_hms_opt(18, 5, 0).unwrap()));
    }
}
