//! Time-slot bookability for a single day.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use crate::models::{CalendarEntry, ClockTime, DayStatus, ServiceData, TimeRange, MINUTES_PER_DAY};

/// Minimum delay between now and a same-day start
pub const DEFAULT_MIN_LEAD_MINUTES: i64 = 120;

/// Buffers reserved around a booking when duration-based blocking is on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlotBlocking {
    pub enabled: bool,
    pub buffer_before_minutes: u32,
    pub buffer_after_minutes: u32,
}

impl SlotBlocking {
    pub fn for_service(service: &ServiceData) -> Self {
        Self {
            enabled: service.enable_duration_based_blocking,
            buffer_before_minutes: service.buffer_before_minutes,
            buffer_after_minutes: service.buffer_after_minutes,
        }
    }

    /// `[start, end)` in minutes since midnight, buffers included when enabled.
    /// May extend below 0 or past midnight.
    pub fn interval(&self, start: ClockTime, duration_minutes: u32) -> (i64, i64) {
        let start = start.minutes();
        let end = start + i64::from(duration_minutes);
        if self.enabled {
            (
                start - i64::from(self.buffer_before_minutes),
                end + i64::from(self.buffer_after_minutes),
            )
        } else {
            (start, end)
        }
    }
}

/// Outcome of a slot check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SlotVerdict {
    Bookable,
    Past,
    TooSoon,
    DayUnavailable,
    OutsideAvailability,
    Overlaps { booked: TimeRange },
}

impl SlotVerdict {
    pub fn is_bookable(&self) -> bool {
        matches!(self, SlotVerdict::Bookable)
    }
}

/// Half-open overlap test between `[start, end)` and a booked range
pub fn overlaps(start: i64, end: i64, booked: &TimeRange) -> bool {
    start < booked.end.minutes() && end > booked.start.minutes()
}

/// Decide whether `start` + `duration_minutes` can be booked on `entry`.
///
/// `now` is the client's local wall-clock time.
pub fn check_slot(
    entry: &CalendarEntry,
    start: ClockTime,
    duration_minutes: u32,
    blocking: &SlotBlocking,
    now: NaiveDateTime,
    min_lead_minutes: i64,
) -> SlotVerdict {
    let today = now.date();
    if entry.date < today || entry.status == DayStatus::Past {
        return SlotVerdict::Past;
    }
    if entry.status == DayStatus::Unavailable || entry.remaining_capacity == Some(0) {
        return SlotVerdict::DayUnavailable;
    }
    // A booking starts before midnight and ends by it
    if start >= ClockTime::END_OF_DAY
        || start.minutes() + i64::from(duration_minutes) > i64::from(MINUTES_PER_DAY)
    {
        return SlotVerdict::OutsideAvailability;
    }
    if entry.date == today {
        let now_seconds = i64::from(now.time().num_seconds_from_midnight());
        if start.minutes() * 60 < now_seconds + min_lead_minutes * 60 {
            return SlotVerdict::TooSoon;
        }
    }

    let (from, to) = blocking.interval(start, duration_minutes);

    if !entry.time_slots.is_empty()
        && !entry
            .time_slots
            .iter()
            .any(|window| window.start.minutes() <= from && to <= window.end.minutes())
    {
        return SlotVerdict::OutsideAvailability;
    }

    if let Some(booked) = entry.booked_slots.iter().find(|b| overlaps(from, to, b)) {
        return SlotVerdict::Overlaps { booked: *booked };
    }

    SlotVerdict::Bookable
}

/// Start times on a `step_minutes` grid that can be booked, for the time picker.
///
/// Only starts whose booking ends by midnight are offered.
pub fn available_start_times(
    entry: &CalendarEntry,
    duration_minutes: u32,
    step_minutes: u16,
    blocking: &SlotBlocking,
    now: NaiveDateTime,
    min_lead_minutes: i64,
) -> Vec<ClockTime> {
    let step = step_minutes.max(5);
    let latest = i64::from(MINUTES_PER_DAY) - i64::from(duration_minutes);

    (0..MINUTES_PER_DAY)
        .step_by(usize::from(step))
        .filter(|m| i64::from(*m) <= latest)
        .filter_map(|m| ClockTime::from_hm(m / 60, m % 60))
        .filter(|t| {
            check_slot(entry, *t, duration_minutes, blocking, now, min_lead_minutes).is_bookable()
        })
        .collect()
}
