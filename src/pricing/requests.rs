//! Request DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{BookingSelection, ServiceData};

/// Request to compute the price breakdown of a selection
#[derive(Debug, Deserialize)]
pub struct BreakdownRequest {
    /// Inline service; otherwise `selection.service_id` is looked up in the cache
    #[serde(default)]
    pub service: Option<ServiceData>,
    pub selection: BookingSelection,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub commission_rate: Option<Decimal>,
}

/// Request to price a collective formula
#[derive(Debug, Deserialize)]
pub struct CollectivePriceRequest {
    #[serde(default)]
    pub service: Option<ServiceData>,
    #[serde(default)]
    pub service_id: Option<String>,
    pub formule_id: String,
    #[serde(default = "default_animal_count")]
    pub animal_count: u32,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub commission_rate: Option<Decimal>,
}

fn default_animal_count() -> u32 {
    1
}

/// Request for "starting at" prices
#[derive(Debug, Default, Deserialize)]
pub struct MinPriceRequest {
    #[serde(default)]
    pub services: Vec<ServiceData>,
    #[serde(default)]
    pub service_ids: Vec<String>,
    #[serde(default)]
    pub announcer_id: Option<String>,
}
