//! Pricing and availability engine for the pet-sitting booking flow.
//!
//! Module structure:
//! - `models/` - Catalog, selection and calendar types
//! - `pricing/` - Price breakdowns, collective pricing, "starting at" prices
//! - `availability/` - Slot checks, day status, multi-session helpers
//! - `booking/` - Booking-flow step eligibility
//! - `routes/` - Health and catalog sync endpoints
//! - `cache`, `config`, `error` - Infrastructure

pub mod availability;
pub mod booking;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use axum::Router;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::cache::AppCache;
use crate::config::Config;

/// Shared state of every handler
#[derive(Clone)]
pub struct AppState {
    pub cache: AppCache,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            cache: AppCache::new(config.catalog_ttl),
            config: Arc::new(config),
        }
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .merge(pricing::router())
        .merge(availability::router())
        .merge(booking::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
