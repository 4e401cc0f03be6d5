//! Day-level status for capacity-based calendars (collective sessions, boarding)

use serde::Serialize;

use crate::models::{CalendarEntry, DayStatus};

/// Color a calendar day is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayTone {
    Green,
    Amber,
    Red,
    Grey,
}

pub fn day_tone(entry: &CalendarEntry) -> DayTone {
    match entry.status {
        DayStatus::Past => DayTone::Grey,
        DayStatus::Unavailable => DayTone::Red,
        _ if entry.remaining_capacity == Some(0) => DayTone::Red,
        DayStatus::Partial => DayTone::Amber,
        DayStatus::Available => DayTone::Green,
    }
}

/// A day can be picked while it is not past, not closed and has room left
pub fn is_day_selectable(entry: &CalendarEntry) -> bool {
    match entry.status {
        DayStatus::Past | DayStatus::Unavailable => false,
        DayStatus::Available | DayStatus::Partial => entry.remaining_capacity.map_or(true, |r| r > 0),
    }
}

/// Whether `animals` more animals fit on this day
pub fn has_capacity_for(entry: &CalendarEntry, animals: u32) -> bool {
    is_day_selectable(entry) && entry.remaining_capacity.map_or(true, |r| r >= animals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::date;

    fn entry(status: DayStatus, remaining: Option<u32>) -> CalendarEntry {
        let mut e = CalendarEntry::new(date(2026, 7, 1), status);
        e.remaining_capacity = remaining;
        e
    }

    #[test]
    fn test_day_tones() {
        assert_eq!(day_tone(&entry(DayStatus::Available, Some(3))), DayTone::Green);
        assert_eq!(day_tone(&entry(DayStatus::Available, None)), DayTone::Green);
        assert_eq!(day_tone(&entry(DayStatus::Partial, Some(1))), DayTone::Amber);
        assert_eq!(day_tone(&entry(DayStatus::Partial, Some(0))), DayTone::Red);
        assert_eq!(day_tone(&entry(DayStatus::Unavailable, Some(5))), DayTone::Red);
        assert_eq!(day_tone(&entry(DayStatus::Past, Some(5))), DayTone::Grey);
    }

    #[test]
    fn test_selectable_while_capacity_remains() {
        assert!(is_day_selectable(&entry(DayStatus::Partial, Some(1))));
        assert!(is_day_selectable(&entry(DayStatus::Available, None)));
        assert!(!is_day_selectable(&entry(DayStatus::Available, Some(0))));
        assert!(!is_day_selectable(&entry(DayStatus::Past, None)));
        assert!(!is_day_selectable(&entry(DayStatus::Unavailable, None)));
    }

    #[test]
    fn test_has_capacity_for() {
        let e = entry(DayStatus::Partial, Some(2));
        assert!(has_capacity_for(&e, 2));
        assert!(!has_capacity_for(&e, 3));
        assert!(has_capacity_for(&entry(DayStatus::Available, None), 10));
    }
}
