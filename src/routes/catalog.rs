//! Catalog sync route handlers
//!
//! The hosted backend pushes services and calendars here whenever they
//! change; quotes then reference them by id.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::cache::CacheStats;
use crate::error::{AppError, Result};
use crate::models::{CalendarEntry, ServiceData};
use crate::AppState;

/// Store or replace a service
pub async fn put_service(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
    Json(service): Json<ServiceData>,
) -> Result<StatusCode> {
    if service.id != service_id {
        return Err(AppError::BadRequest(format!(
            "path id {} does not match body id {}",
            service_id, service.id
        )));
    }
    tracing::info!(
        service_id = %service.id,
        formules = service.formules.len(),
        options = service.options.len(),
        "Service cached"
    );
    state.cache.put_service(service).await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_service(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<Json<ServiceData>> {
    state
        .cache
        .services
        .get(service_id.as_str())
        .await
        .map(|service| Json((*service).clone()))
        .ok_or_else(|| AppError::NotFound(format!("service {}", service_id)))
}

pub async fn delete_service(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> StatusCode {
    state.cache.invalidate_service(&service_id).await;
    StatusCode::NO_CONTENT
}

/// Store or replace the calendar of a service
pub async fn put_calendar(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
    Json(entries): Json<Vec<CalendarEntry>>,
) -> StatusCode {
    tracing::info!(service_id = %service_id, days = entries.len(), "Calendar cached");
    state.cache.put_calendar(&service_id, entries).await;
    StatusCode::NO_CONTENT
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<Json<Vec<CalendarEntry>>> {
    state
        .cache
        .calendars
        .get(service_id.as_str())
        .await
        .map(|entries| Json((*entries).clone()))
        .ok_or_else(|| AppError::NotFound(format!("calendar of service {}", service_id)))
}

pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

pub async fn invalidate_cache(State(state): State<AppState>) -> StatusCode {
    state.cache.invalidate_all();
    StatusCode::NO_CONTENT
}
