//! In-progress booking selection.
//!
//! The selection is plain client state: the front-end sends it whole on every
//! change and every derived value is recomputed from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::animal::Animal;
use super::service::LocationMode;
use super::time::ClockTime;

/// Everything the client picked so far in the booking flow
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingSelection {
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub formule_id: Option<String>,
    #[serde(default)]
    pub option_ids: Vec<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: Option<ClockTime>,
    #[serde(default)]
    pub end_time: Option<ClockTime>,
    #[serde(default)]
    pub overnight: bool,
    #[serde(default)]
    pub location: Option<LocationMode>,
    #[serde(default)]
    pub address_id: Option<String>,
    #[serde(default)]
    pub collective_slot_ids: Vec<String>,
    #[serde(default)]
    pub animal_count: u32,
    #[serde(default)]
    pub animals: Vec<Animal>,
}

impl BookingSelection {
    /// Number of calendar days covered, inclusive. `None` without a start date.
    ///
    /// A missing end date, or one before the start, counts as a single day.
    pub fn total_days(&self) -> Option<i64> {
        let start = self.start_date?;
        let end = self.end_date.unwrap_or(start);
        Some((end - start).num_days().max(0) + 1)
    }

    /// Animal count, falling back to the number of picked animals
    pub fn effective_animal_count(&self) -> u32 {
        if self.animal_count > 0 {
            self.animal_count
        } else {
            self.animals.len() as u32
        }
    }
}
