//! Multi-session scheduling: spacing checks and weekly auto-fill.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::models::{CalendarEntry, ClockTime};

use super::capacity::has_capacity_for;
use super::slots::{check_slot, SlotBlocking};

/// Suggestions never look further than this from the first session
pub const MAX_LOOKAHEAD_WEEKS: i64 = 52;

/// `false` when any already selected date is closer than `interval_days` to `candidate`
pub fn check_interval(selected: &[NaiveDate], candidate: NaiveDate, interval_days: u32) -> bool {
    let interval = i64::from(interval_days);
    selected
        .iter()
        .all(|date| (candidate - *date).num_days().abs() >= interval)
}

/// Parameters of an auto-fill suggestion
#[derive(Debug, Clone, Deserialize)]
pub struct SessionPlan {
    pub first_date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<ClockTime>,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    pub sessions: u32,
    #[serde(default)]
    pub interval_days: u32,
    #[serde(default = "default_animals")]
    pub animal_count: u32,
}

fn default_duration() -> u32 {
    60
}

fn default_animals() -> u32 {
    1
}

/// Propose up to `sessions - 1` more dates on the weekday of `first_date`.
///
/// Candidates are tried week by week; a date is kept when the calendar knows
/// it, it has room for the animals, the start time is bookable (if given) and
/// it respects the session interval. Dates missing from the calendar are
/// treated as unavailable.
pub fn suggest_sessions(
    plan: &SessionPlan,
    calendar: &[CalendarEntry],
    blocking: &SlotBlocking,
    now: NaiveDateTime,
    min_lead_minutes: i64,
) -> Vec<NaiveDate> {
    let wanted = plan.sessions.saturating_sub(1) as usize;
    if wanted == 0 {
        return Vec::new();
    }

    let by_date: HashMap<NaiveDate, &CalendarEntry> =
        calendar.iter().map(|entry| (entry.date, entry)).collect();
    let Some(last_known) = calendar.iter().map(|entry| entry.date).max() else {
        return Vec::new();
    };
    let horizon = last_known.min(plan.first_date + Duration::weeks(MAX_LOOKAHEAD_WEEKS));

    let mut picked = vec![plan.first_date];
    let mut candidate = plan.first_date + Duration::weeks(1);

    while candidate <= horizon && picked.len() <= wanted {
        let usable = by_date.get(&candidate).is_some_and(|entry| {
            has_capacity_for(entry, plan.animal_count)
                && plan.start_time.map_or(true, |start| {
                    check_slot(entry, start, plan.duration_minutes, blocking, now, min_lead_minutes)
                        .is_bookable()
                })
        });

        if usable && check_interval(&picked, candidate, plan.interval_days) {
            picked.push(candidate);
        }
        candidate += Duration::weeks(1);
    }

    picked.split_off(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayStatus, TimeRange};
    use crate::testing::{date, time};
    use chrono::Datelike;

    fn now() -> NaiveDateTime {
        date(2026, 8, 1).and_hms_opt(12, 0, 0).unwrap()
    }

    fn calendar(from: NaiveDate, days: i64) -> Vec<CalendarEntry> {
        (0..days)
            .map(|i| CalendarEntry::new(from + Duration::days(i), DayStatus::Available))
            .collect()
    }

    fn plan(sessions: u32, interval_days: u32) -> SessionPlan {
        SessionPlan {
            first_date: date(2026, 8, 3),
            start_time: Some(time("10:00")),
            duration_minutes: 60,
            sessions,
            interval_days,
            animal_count: 1,
        }
    }

    #[test]
    fn test_check_interval_empty_selection() {
        assert!(check_interval(&[], date(2026, 8, 3), 0));
        assert!(check_interval(&[], date(2026, 8, 3), 30));
    }

    #[test]
    fn test_check_interval_rejects_close_dates() {
        let selected = [date(2026, 8, 3), date(2026, 8, 17)];
        assert!(!check_interval(&selected, date(2026, 8, 8), 7));
        assert!(check_interval(&selected, date(2026, 8, 10), 7));
        assert!(check_interval(&selected, date(2026, 8, 24), 7));
        // Before the first selected date counts too
        assert!(!check_interval(&selected, date(2026, 7, 30), 7));
    }

    #[test]
    fn test_suggest_same_weekday() {
        let cal = calendar(date(2026, 8, 1), 60);
        let suggested = suggest_sessions(&plan(4, 7), &cal, &SlotBlocking::default(), now(), 120);

        assert_eq!(
            suggested,
            vec![date(2026, 8, 10), date(2026, 8, 17), date(2026, 8, 24)]
        );
        assert!(suggested.iter().all(|d| d.weekday() == date(2026, 8, 3).weekday()));
    }

    #[test]
    fn test_suggest_respects_interval_and_availability() {
        let mut cal = calendar(date(2026, 8, 1), 60);
        // Aug 17 closed, Aug 31 booked at 10:00
        for entry in cal.iter_mut() {
            if entry.date == date(2026, 8, 17) {
                entry.status = DayStatus::Unavailable;
            }
            if entry.date == date(2026, 8, 31) {
                entry.booked_slots.push(TimeRange::new(time("09:30"), time("10:30")));
            }
        }

        let suggested = suggest_sessions(&plan(3, 14), &cal, &SlotBlocking::default(), now(), 120);
        // Aug 10 too close, Aug 17 closed, Aug 24 ok, Aug 31 booked, Sep 7 ok
        assert_eq!(suggested, vec![date(2026, 8, 24), date(2026, 9, 7)]);
    }

    #[test]
    fn test_suggest_stops_at_calendar_end() {
        let cal = calendar(date(2026, 8, 1), 14);
        let suggested = suggest_sessions(&plan(5, 7), &cal, &SlotBlocking::default(), now(), 120);
        assert_eq!(suggested, vec![date(2026, 8, 10)]);
    }

    #[test]
    fn test_single_session_needs_no_suggestion() {
        let cal = calendar(date(2026, 8, 1), 30);
        assert!(suggest_sessions(&plan(1, 7), &cal, &SlotBlocking::default(), now(), 120).is_empty());
    }
}
