//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Cents, PriceUnit};

use super::calculators::{CollectivePrice, PriceBreakdown};
use super::money::{calculate_price_with_commission, format_price};
use super::services::PricingError;

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyResponse {
    /// Integer cents
    pub amount: Cents,
    /// French display, "40,25"
    pub formatted: String,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Cents, currency: &str) -> Self {
        Self {
            amount,
            formatted: format_price(amount),
            currency: currency.to_string(),
        }
    }
}

/// Response for a booking breakdown
#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    pub quote_id: Uuid,
    pub service_id: String,
    /// `false` while the selection lacks a formula or a date
    pub computable: bool,
    pub breakdown: Option<BreakdownDetail>,
}

/// Price breakdown with display values
#[derive(Debug, Serialize)]
pub struct BreakdownDetail {
    pub total_days: i64,
    pub base_amount: MoneyResponse,
    pub first_day_amount: MoneyResponse,
    pub full_days: i64,
    pub full_days_amount: MoneyResponse,
    pub last_day_amount: MoneyResponse,
    pub nights: i64,
    pub nights_amount: MoneyResponse,
    pub options_amount: MoneyResponse,
    pub subtotal: MoneyResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub commission_rate: Decimal,
    pub commission: MoneyResponse,
    pub total: MoneyResponse,
}

impl BreakdownDetail {
    pub fn from_breakdown(b: &PriceBreakdown, currency: &str) -> Self {
        let money = |amount| MoneyResponse::new(amount, currency);
        Self {
            total_days: b.total_days,
            base_amount: money(b.base_amount),
            first_day_amount: money(b.first_day_amount),
            full_days: b.full_days,
            full_days_amount: money(b.full_days_amount),
            last_day_amount: money(b.last_day_amount),
            nights: b.nights,
            nights_amount: money(b.nights_amount),
            options_amount: money(b.options_amount),
            subtotal: money(b.subtotal),
            commission_rate: b.commission_rate,
            commission: money(b.commission),
            total: money(b.total),
        }
    }
}

/// Response for collective formula pricing
#[derive(Debug, Serialize)]
pub struct CollectivePriceResponse {
    pub quote_id: Uuid,
    pub pack_price: MoneyResponse,
    pub animal_count: u32,
    pub base_amount: MoneyResponse,
    pub commission: MoneyResponse,
    pub total: MoneyResponse,
}

impl CollectivePriceResponse {
    pub fn new(price: &CollectivePrice, currency: &str) -> Self {
        Self {
            quote_id: Uuid::new_v4(),
            pack_price: MoneyResponse::new(price.pack_price, currency),
            animal_count: price.animal_count,
            base_amount: MoneyResponse::new(price.base_amount, currency),
            commission: MoneyResponse::new(price.commission, currency),
            total: MoneyResponse::new(price.total, currency),
        }
    }
}

/// A "starting at" price as displayed on cards
#[derive(Debug, Clone, Serialize)]
pub struct PriceTag {
    pub amount: MoneyResponse,
    /// Amount the client pays, commission included
    pub display_amount: MoneyResponse,
    pub unit: PriceUnit,
    pub unit_label: &'static str,
}

impl PriceTag {
    pub fn new(
        amount: Cents,
        unit: PriceUnit,
        commission_rate: Decimal,
        currency: &str,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            amount: MoneyResponse::new(amount, currency),
            display_amount: MoneyResponse::new(
                calculate_price_with_commission(amount, commission_rate)?,
                currency,
            ),
            unit,
            unit_label: unit.label(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceMinPriceResponse {
    pub service_id: String,
    pub starting_at: Option<PriceTag>,
}

/// Response for "starting at" prices
#[derive(Debug, Serialize)]
pub struct MinPriceResponse {
    pub services: Vec<ServiceMinPriceResponse>,
    /// Lowest price across all services
    pub starting_at: Option<PriceTag>,
}
