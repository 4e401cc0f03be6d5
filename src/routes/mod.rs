//! HTTP routes shared by all engines

pub mod catalog;

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/catalog/services/:service_id",
            put(catalog::put_service)
                .get(catalog::get_service)
                .delete(catalog::delete_service),
        )
        .route(
            "/api/catalog/calendars/:service_id",
            put(catalog::put_calendar).get(catalog::get_calendar),
        )
        .route("/api/cache/stats", get(catalog::cache_stats))
        .route("/api/cache/invalidate", post(catalog::invalidate_cache))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
