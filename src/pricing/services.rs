//! Pricing service functions with cache access.
//!
//! These functions resolve catalog data (from the request itself or from the
//! catalog cache) and hand it to the pure calculators.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::cache::AppCache;
use crate::models::{BookingSelection, Cents, PriceUnit, ServiceData};

use super::calculators::{calculate_collective_price, calculate_price_breakdown, CollectivePrice, PriceBreakdown};
use super::settings::PricingSettings;
use super::units::get_service_min_price;

/// Pricing error types
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Neither an inline service nor a service id was given
    MissingService,
    UnknownService {
        service_id: String,
    },
    UnknownFormule {
        service_id: String,
        formule_id: String,
    },
    InvalidCommission {
        rate: Decimal,
    },
    /// An amount does not fit in 64-bit cents
    AmountOverflow,
}

impl PricingError {
    /// Stable identifier used as `error_type` in responses
    pub fn kind(&self) -> &'static str {
        match self {
            PricingError::MissingService => "missing_service",
            PricingError::UnknownService { .. } => "unknown_service",
            PricingError::UnknownFormule { .. } => "unknown_formule",
            PricingError::InvalidCommission { .. } => "invalid_commission",
            PricingError::AmountOverflow => "amount_overflow",
        }
    }
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::MissingService => write!(f, "No service given (inline or by id)"),
            PricingError::UnknownService { service_id } => {
                write!(f, "Service {} is not in the catalog cache", service_id)
            }
            PricingError::UnknownFormule { service_id, formule_id } => {
                write!(f, "Formula {} is not offered by service {}", formule_id, service_id)
            }
            PricingError::InvalidCommission { rate } => {
                write!(f, "Commission rate {} must be between 0 and 100", rate)
            }
            PricingError::AmountOverflow => write!(f, "Amount exceeds the supported range"),
        }
    }
}

impl std::error::Error for PricingError {}

/// Result of a booking quote
#[derive(Debug, Clone)]
pub struct QuoteResult {
    pub service_id: String,
    /// `None` while the selection is not computable yet
    pub breakdown: Option<PriceBreakdown>,
}

/// Result of a "starting at" lookup for one service
#[derive(Debug, Clone)]
pub struct ServiceMinPrice {
    pub service_id: String,
    pub price: Option<(Cents, PriceUnit)>,
}

/// Resolve the service a request refers to.
///
/// An inline service wins over the cache, so the client can price catalog
/// data that has not been pushed yet.
pub async fn resolve_service(
    cache: &AppCache,
    inline: Option<ServiceData>,
    service_id: Option<&str>,
) -> Result<Arc<ServiceData>, PricingError> {
    if let Some(service) = inline {
        return Ok(Arc::new(service));
    }

    let service_id = service_id.ok_or(PricingError::MissingService)?;
    match cache.services.get(service_id).await {
        Some(service) => {
            tracing::debug!("Cache HIT for service: {}", service_id);
            Ok(service)
        }
        None => {
            tracing::debug!("Cache MISS for service: {}", service_id);
            Err(PricingError::UnknownService {
                service_id: service_id.to_string(),
            })
        }
    }
}

/// Apply an optional per-request commission override
pub fn effective_settings(
    settings: &PricingSettings,
    commission_override: Option<Decimal>,
) -> Result<PricingSettings, PricingError> {
    match commission_override {
        None => Ok(settings.clone()),
        Some(rate) if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED => {
            Err(PricingError::InvalidCommission { rate })
        }
        Some(rate) => Ok(PricingSettings {
            commission_rate: rate,
            ..settings.clone()
        }),
    }
}

/// Quote a booking selection.
///
/// A selection whose formula is not offered by the resolved service is an
/// error, as is a total out of range; any other missing input yields an
/// empty breakdown.
pub async fn quote_booking(
    cache: &AppCache,
    settings: &PricingSettings,
    inline: Option<ServiceData>,
    selection: &BookingSelection,
) -> Result<QuoteResult, PricingError> {
    let service = resolve_service(cache, inline, selection.service_id.as_deref()).await?;

    if let Some(formule_id) = selection.formule_id.as_deref() {
        if service.formule(formule_id).is_none() {
            return Err(PricingError::UnknownFormule {
                service_id: service.id.clone(),
                formule_id: formule_id.to_string(),
            });
        }
    }

    let breakdown = calculate_price_breakdown(&service, selection, settings)?;
    if let Some(b) = &breakdown {
        tracing::debug!(
            service_id = %service.id,
            total_days = b.total_days,
            subtotal = b.subtotal,
            total = b.total,
            "Quote computed"
        );
    }

    Ok(QuoteResult {
        service_id: service.id.clone(),
        breakdown,
    })
}

/// Price a collective formula of a resolved service
pub fn quote_collective(
    service: &ServiceData,
    formule_id: &str,
    animal_count: u32,
    settings: &PricingSettings,
) -> Result<CollectivePrice, PricingError> {
    let formule = service
        .formule(formule_id)
        .ok_or_else(|| PricingError::UnknownFormule {
            service_id: service.id.clone(),
            formule_id: formule_id.to_string(),
        })?;

    calculate_collective_price(formule, animal_count, settings.commission_rate)
}

/// "Starting at" prices of the requested services.
///
/// Services come from the request, then from the cache by id, then from the
/// cache by announcer. Unknown ids are skipped.
pub async fn min_prices(
    cache: &AppCache,
    inline: Vec<ServiceData>,
    service_ids: &[String],
    announcer_id: Option<&str>,
) -> Vec<ServiceMinPrice> {
    let mut services: Vec<Arc<ServiceData>> = inline.into_iter().map(Arc::new).collect();

    for id in service_ids {
        match cache.services.get(id.as_str()).await {
            Some(service) => services.push(service),
            None => tracing::debug!("Cache MISS for service: {}", id),
        }
    }

    if let Some(announcer_id) = announcer_id {
        services.extend(cache.services_for_announcer(announcer_id));
    }

    let mut seen = std::collections::HashSet::new();
    services
        .iter()
        .filter(|service| seen.insert(service.id.clone()))
        .map(|service| ServiceMinPrice {
            service_id: service.id.clone(),
            price: get_service_min_price(service),
        })
        .collect()
}
