//! Booking-flow route handlers

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{BookingSelection, CalendarEntry, ServiceData};
use crate::AppState;

use super::steps::{
    can_proceed, first_blocked_step, next_step, previous_step, visible_steps, BookingStep,
    StepBlocker, StepContext,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/booking/steps", post(steps))
}

#[derive(Debug, Deserialize)]
pub struct StepsRequest {
    #[serde(default)]
    pub service: Option<ServiceData>,
    pub selection: BookingSelection,
    #[serde(default)]
    pub calendar: Option<Vec<CalendarEntry>>,
    #[serde(default = "default_step")]
    pub current_step: BookingStep,
}

fn default_step() -> BookingStep {
    BookingStep::Service
}

#[derive(Debug, Serialize)]
pub struct BlockedStep {
    pub step: BookingStep,
    pub blocker: StepBlocker,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StepsResponse {
    pub steps: Vec<BookingStep>,
    pub current_step: BookingStep,
    pub can_proceed: bool,
    pub blocker: Option<StepBlocker>,
    pub next_step: Option<BookingStep>,
    pub previous_step: Option<BookingStep>,
    /// Whether the booking can be submitted
    pub ready: bool,
    pub first_blocked: Option<BlockedStep>,
}

/// Step eligibility of the booking flow for the current selection
async fn steps(
    State(state): State<AppState>,
    Json(request): Json<StepsRequest>,
) -> Result<Json<StepsResponse>> {
    // A selection may legitimately reference no service yet
    let service: Option<Arc<ServiceData>> = match request.service {
        Some(service) => Some(Arc::new(service)),
        None => match request.selection.service_id.as_deref() {
            Some(id) => state.cache.services.get(id).await,
            None => None,
        },
    };

    let calendar: Arc<Vec<CalendarEntry>> = match (request.calendar, service.as_ref()) {
        (Some(calendar), _) => Arc::new(calendar),
        (None, Some(service)) => state
            .cache
            .calendars
            .get(service.id.as_str())
            .await
            .unwrap_or_default(),
        (None, None) => Arc::default(),
    };

    let ctx = StepContext {
        service: service.as_deref(),
        selection: &request.selection,
        calendar: &calendar,
    };

    let current = request.current_step;
    let gate = can_proceed(current, &ctx);
    let first_blocked = first_blocked_step(&ctx).map(|(step, blocker)| BlockedStep {
        step,
        message: blocker.to_string(),
        blocker,
    });

    Ok(Json(StepsResponse {
        steps: visible_steps(ctx.service, ctx.formule()),
        current_step: current,
        can_proceed: gate.is_ok(),
        blocker: gate.err(),
        next_step: next_step(current, &ctx),
        previous_step: previous_step(current, &ctx),
        ready: first_blocked.is_none(),
        first_blocked,
    }))
}
