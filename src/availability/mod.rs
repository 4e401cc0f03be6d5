//! Availability engine: slot checks, day status and multi-session helpers.

pub mod capacity;
pub mod routes;
pub mod sessions;
pub mod slots;

pub use capacity::{day_tone, has_capacity_for, is_day_selectable, DayTone};
pub use routes::router;
pub use sessions::{check_interval, suggest_sessions, SessionPlan};
pub use slots::{available_start_times, check_slot, SlotBlocking, SlotVerdict, DEFAULT_MIN_LEAD_MINUTES};
