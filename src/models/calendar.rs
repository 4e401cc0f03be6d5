//! Per-day availability as computed by the backend

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time::TimeRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Available,
    Partial,
    Unavailable,
    Past,
}

/// Availability of one date for a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub date: NaiveDate,
    pub status: DayStatus,
    /// Remaining places for capacity-based (collective, boarding) services
    #[serde(default)]
    pub remaining_capacity: Option<u32>,
    #[serde(default)]
    pub booked_slots: Vec<TimeRange>,
    /// Explicit availability windows; empty means the whole day
    #[serde(default)]
    pub time_slots: Vec<TimeRange>,
}

impl CalendarEntry {
    pub fn new(date: NaiveDate, status: DayStatus) -> Self {
        Self {
            date,
            status,
            remaining_capacity: None,
            booked_slots: Vec::new(),
            time_slots: Vec::new(),
        }
    }
}
