//! In-memory catalog cache using moka
//!
//! The hosted backend pushes the catalog data quotes are computed from:
//! services with their formulas and options, and per-service calendars.
//! Entries expire so that a missed push never serves stale prices for long.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::models::{CalendarEntry, ServiceData};

/// Application cache holding catalog data
#[derive(Clone)]
pub struct AppCache {
    /// Services (service id -> ServiceData)
    pub services: Cache<String, Arc<ServiceData>>,
    /// Calendars (service id -> entries sorted by date)
    pub calendars: Cache<String, Arc<Vec<CalendarEntry>>>,
}

impl AppCache {
    /// Create a new cache instance; calendars live a quarter of the catalog TTL
    pub fn new(catalog_ttl: Duration) -> Self {
        Self {
            services: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(catalog_ttl)
                .build(),

            // Availability changes with every booking
            calendars: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(catalog_ttl / 4)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            services_size: self.services.entry_count(),
            calendars_size: self.calendars.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.services.invalidate_all();
        self.calendars.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate a service and its calendar
    pub async fn invalidate_service(&self, service_id: &str) {
        self.services.invalidate(service_id).await;
        self.calendars.invalidate(service_id).await;
        info!("Cache invalidated for service: {}", service_id);
    }

    pub async fn put_service(&self, service: ServiceData) {
        self.services
            .insert(service.id.clone(), Arc::new(service))
            .await;
    }

    pub async fn put_calendar(&self, service_id: &str, mut entries: Vec<CalendarEntry>) {
        entries.sort_by_key(|entry| entry.date);
        self.calendars
            .insert(service_id.to_string(), Arc::new(entries))
            .await;
    }

    /// Cached services of an announcer
    pub fn services_for_announcer(&self, announcer_id: &str) -> Vec<Arc<ServiceData>> {
        self.services
            .iter()
            .filter(|(_, service)| service.announcer_id.as_deref() == Some(announcer_id))
            .map(|(_, service)| service)
            .collect()
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(30 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub services_size: u64,
    pub calendars_size: u64,
}
