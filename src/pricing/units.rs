//! Price-unit priority and "starting at" prices.
//!
//! Boarding ("garde") services are billed by the day, everything else by the
//! visit or hour, so the lookup order of a formula's tiered prices depends on
//! the service category.

use crate::models::{Cents, FormuleData, PriceUnit, PricingMode, ServiceData};

const GARDE_PRIORITY: [PriceUnit; 4] = [
    PriceUnit::Day,
    PriceUnit::Week,
    PriceUnit::Month,
    PriceUnit::Hour,
];

const PUNCTUAL_PRIORITY: [PriceUnit; 4] = [
    PriceUnit::Hour,
    PriceUnit::Day,
    PriceUnit::Week,
    PriceUnit::Month,
];

/// Lookup order of tiered prices for a pricing mode
pub fn unit_priority(mode: PricingMode) -> &'static [PriceUnit] {
    match mode {
        PricingMode::Garde => &GARDE_PRIORITY,
        PricingMode::Punctual => &PUNCTUAL_PRIORITY,
    }
}

/// Resolve the price of a formula and the unit it applies to.
///
/// The first positive tier in priority order wins; without one the flat
/// `price`/`unit` pair is used. Returns `None` when nothing positive exists.
pub fn get_formule_price(formule: &FormuleData, mode: PricingMode) -> Option<(Cents, PriceUnit)> {
    if let Some(table) = &formule.pricing {
        let tiered = unit_priority(mode)
            .iter()
            .find_map(|unit| table.get(*unit).map(|price| (price, *unit)));
        if tiered.is_some() {
            return tiered;
        }
    }

    (formule.price > 0).then_some((formule.price, formule.unit))
}

/// Price shown on a formula card before any selection
pub fn get_formule_best_price(
    formule: &FormuleData,
    mode: PricingMode,
) -> Option<(Cents, PriceUnit)> {
    get_formule_price(formule, mode)
}

/// Lowest positive formula price of a service
pub fn get_service_min_price(service: &ServiceData) -> Option<(Cents, PriceUnit)> {
    let mode = service.pricing_mode();
    service
        .formules
        .iter()
        .filter_map(|f| get_formule_best_price(f, mode))
        .min_by_key(|(price, _)| *price)
}

/// Lowest "starting at" price across all services of an announcer
pub fn get_announcer_min_price(services: &[ServiceData]) -> Option<(Cents, PriceUnit)> {
    services
        .iter()
        .filter_map(get_service_min_price)
        .min_by_key(|(price, _)| *price)
}
