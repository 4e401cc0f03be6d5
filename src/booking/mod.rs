//! Booking-flow orchestration rules

pub mod routes;
pub mod steps;

pub use routes::router;
pub use steps::{
    can_proceed, first_blocked_step, next_step, previous_step, visible_steps, BookingStep,
    StepBlocker, StepContext,
};
