//! Availability route handlers

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{CalendarEntry, ClockTime, ServiceData};
use crate::AppState;

use super::capacity::{day_tone, is_day_selectable, DayTone};
use super::sessions::{check_interval, suggest_sessions, SessionPlan};
use super::slots::{available_start_times, check_slot, SlotBlocking, SlotVerdict};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/availability/slot", post(slot))
        .route("/api/availability/start-times", post(start_times))
        .route("/api/availability/days", post(days))
        .route("/api/sessions/check", post(sessions_check))
        .route("/api/sessions/suggest", post(sessions_suggest))
}

/// Where a calendar comes from: inline entries, or the cached calendar of a service
#[derive(Debug, Default, Deserialize)]
pub struct CalendarSource {
    #[serde(default)]
    pub service: Option<ServiceData>,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub calendar: Option<Vec<CalendarEntry>>,
    /// Client wall-clock time; defaults to the server's local time
    #[serde(default)]
    pub as_of: Option<NaiveDateTime>,
}

impl CalendarSource {
    fn service_id(&self) -> Option<&str> {
        self.service
            .as_ref()
            .map(|s| s.id.as_str())
            .or(self.service_id.as_deref())
    }

    fn now(&self) -> NaiveDateTime {
        self.as_of.unwrap_or_else(|| Local::now().naive_local())
    }

    async fn blocking(&self, state: &AppState) -> SlotBlocking {
        if let Some(service) = &self.service {
            return SlotBlocking::for_service(service);
        }
        match self.service_id.as_deref() {
            Some(id) => state
                .cache
                .services
                .get(id)
                .await
                .map(|service| SlotBlocking::for_service(&service))
                .unwrap_or_default(),
            None => SlotBlocking::default(),
        }
    }

    async fn entries(&self, state: &AppState) -> Result<Arc<Vec<CalendarEntry>>> {
        if let Some(calendar) = &self.calendar {
            return Ok(Arc::new(calendar.clone()));
        }
        let service_id = self
            .service_id()
            .ok_or_else(|| AppError::BadRequest("calendar or service_id is required".to_string()))?;
        state
            .cache
            .calendars
            .get(service_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("no calendar cached for service {}", service_id)))
    }

    async fn entry(&self, state: &AppState, date: NaiveDate) -> Result<CalendarEntry> {
        self.entries(state)
            .await?
            .iter()
            .find(|entry| entry.date == date)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("no calendar entry for {}", date)))
    }
}

#[derive(Debug, Deserialize)]
pub struct SlotCheckRequest {
    #[serde(flatten)]
    pub source: CalendarSource,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
}

fn default_duration() -> u32 {
    60
}

#[derive(Debug, Serialize)]
pub struct SlotCheckResponse {
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub bookable: bool,
    #[serde(flatten)]
    pub verdict: SlotVerdict,
}

/// Check a single candidate start time
async fn slot(
    State(state): State<AppState>,
    Json(request): Json<SlotCheckRequest>,
) -> Result<Json<SlotCheckResponse>> {
    let entry = request.source.entry(&state, request.date).await?;
    let blocking = request.source.blocking(&state).await;
    let verdict = check_slot(
        &entry,
        request.start_time,
        request.duration_minutes,
        &blocking,
        request.source.now(),
        state.config.min_lead_minutes,
    );

    Ok(Json(SlotCheckResponse {
        date: request.date,
        start_time: request.start_time,
        bookable: verdict.is_bookable(),
        verdict,
    }))
}

#[derive(Debug, Deserialize)]
pub struct StartTimesRequest {
    #[serde(flatten)]
    pub source: CalendarSource,
    pub date: NaiveDate,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(default = "default_step")]
    pub step_minutes: u16,
}

fn default_step() -> u16 {
    30
}

#[derive(Debug, Serialize)]
pub struct StartTimesResponse {
    pub date: NaiveDate,
    pub start_times: Vec<ClockTime>,
}

/// Bookable start times of a day for the time picker
async fn start_times(
    State(state): State<AppState>,
    Json(request): Json<StartTimesRequest>,
) -> Result<Json<StartTimesResponse>> {
    let entry = request.source.entry(&state, request.date).await?;
    let blocking = request.source.blocking(&state).await;

    Ok(Json(StartTimesResponse {
        date: request.date,
        start_times: available_start_times(
            &entry,
            request.duration_minutes,
            request.step_minutes,
            &blocking,
            request.source.now(),
            state.config.min_lead_minutes,
        ),
    }))
}

#[derive(Debug, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub tone: DayTone,
    pub selectable: bool,
    pub remaining_capacity: Option<u32>,
}

/// Calendar days with their display tone
async fn days(
    State(state): State<AppState>,
    Json(source): Json<CalendarSource>,
) -> Result<Json<Vec<DayView>>> {
    let entries = source.entries(&state).await?;
    Ok(Json(
        entries
            .iter()
            .map(|entry| DayView {
                date: entry.date,
                tone: day_tone(entry),
                selectable: is_day_selectable(entry),
                remaining_capacity: entry.remaining_capacity,
            })
            .collect(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct IntervalCheckRequest {
    #[serde(default)]
    pub selected: Vec<NaiveDate>,
    pub candidate: NaiveDate,
    #[serde(default)]
    pub interval_days: u32,
}

#[derive(Debug, Serialize)]
pub struct IntervalCheckResponse {
    pub allowed: bool,
}

/// Spacing check before adding a session date
async fn sessions_check(Json(request): Json<IntervalCheckRequest>) -> Json<IntervalCheckResponse> {
    Json(IntervalCheckResponse {
        allowed: check_interval(&request.selected, request.candidate, request.interval_days),
    })
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    #[serde(flatten)]
    pub source: CalendarSource,
    pub plan: SessionPlan,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub first_date: NaiveDate,
    pub suggested: Vec<NaiveDate>,
}

/// Auto-fill the remaining sessions of a multi-session formula
async fn sessions_suggest(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>> {
    let entries = request.source.entries(&state).await?;
    let blocking = request.source.blocking(&state).await;
    let suggested = suggest_sessions(
        &request.plan,
        &entries,
        &blocking,
        request.source.now(),
        state.config.min_lead_minutes,
    );
    tracing::debug!(
        first_date = %request.plan.first_date,
        wanted = request.plan.sessions,
        found = suggested.len(),
        "Sessions suggested"
    );

    Ok(Json(SuggestResponse {
        first_date: request.plan.first_date,
        suggested,
    }))
}
