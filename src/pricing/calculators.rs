//! Core pricing calculation functions.
//!
//! Pure functions for booking price math - no cache or network access.
//! Every breakdown is recomputed from the selection on each change.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BookingSelection, Cents, FormuleData, PriceUnit, ServiceData};

use super::money::{add_cents, calculate_commission, mul_cents, prorate};
use super::partial_day::{calculate_partial_day_amount, BillingPolicy, DayRates};
use super::services::PricingError;
use super::settings::PricingSettings;
use super::units::get_formule_price;

/// Price breakdown of a booking selection
///
/// `total == subtotal + commission` and
/// `subtotal == base_amount + nights_amount + options_amount`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub total_days: i64,
    pub base_amount: Cents,
    pub first_day_amount: Cents,
    pub full_days: i64,
    pub full_days_amount: Cents,
    pub last_day_amount: Cents,
    pub nights: i64,
    pub nights_amount: Cents,
    pub options_amount: Cents,
    pub subtotal: Cents,
    pub commission_rate: Decimal,
    pub commission: Cents,
    pub total: Cents,
}

/// Result of collective formula pricing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectivePrice {
    /// Price of the whole multi-session pack for one animal
    pub pack_price: Cents,
    pub animal_count: u32,
    pub base_amount: Cents,
    pub commission: Cents,
    pub total: Cents,
}

/// Compute the price breakdown of a selection.
///
/// Returns `Ok(None)` while the selection is not computable yet: no formula,
/// a formula that does not belong to the service, or no start date. Amounts
/// that do not fit in 64-bit cents are an error.
pub fn calculate_price_breakdown(
    service: &ServiceData,
    selection: &BookingSelection,
    settings: &PricingSettings,
) -> Result<Option<PriceBreakdown>, PricingError> {
    let Some(formule_id) = selection.formule_id.as_deref() else {
        return Ok(None);
    };
    let Some(formule) = service.formule(formule_id) else {
        tracing::debug!(service_id = %service.id, formule_id, "formula not offered by service");
        return Ok(None);
    };

    let options_amount = calculate_options_amount(service, &selection.option_ids)?;

    if formule.is_collective {
        if selection.start_date.is_none() && selection.collective_slot_ids.is_empty() {
            return Ok(None);
        }
        let animals = selection.effective_animal_count().max(1);
        let base_amount = mul_cents(collective_pack_price(formule)?, i64::from(animals))?;
        return assemble(
            selection.total_days().unwrap_or(1),
            DaySplit::single(base_amount),
            0,
            0,
            options_amount,
            settings.commission_rate,
        )
        .map(Some);
    }

    let Some(total_days) = selection.total_days() else {
        return Ok(None);
    };
    let policy = BillingPolicy::for_service(service, settings);
    let rates = DayRates::for_formule(service, formule, &policy)?;

    let split = if total_days == 1 {
        DaySplit::single(single_day_amount(service, formule, selection, &rates, &policy, settings)?)
    } else {
        multi_day_split(total_days, selection, &rates, &policy, settings)?
    };

    let (nights, nights_amount) = if selection.overnight {
        let nights = total_days - 1;
        (nights, mul_cents(formule.overnight_price.unwrap_or(0), nights)?)
    } else {
        (0, 0)
    };

    assemble(
        total_days,
        split,
        nights,
        nights_amount,
        options_amount,
        settings.commission_rate,
    )
    .map(Some)
}

/// Price a collective formula for `animal_count` animals, commission included.
pub fn calculate_collective_price(
    formule: &FormuleData,
    animal_count: u32,
    commission_rate: Decimal,
) -> Result<CollectivePrice, PricingError> {
    let pack_price = collective_pack_price(formule)?;
    let base_amount = mul_cents(pack_price, i64::from(animal_count))?;
    let commission = calculate_commission(base_amount, commission_rate)?;

    Ok(CollectivePrice {
        pack_price,
        animal_count,
        base_amount,
        commission,
        total: add_cents(base_amount, commission)?,
    })
}

/// Sum of the selected add-ons that belong to the service. Unknown or repeated ids are ignored.
pub fn calculate_options_amount(service: &ServiceData, option_ids: &[String]) -> Result<Cents, PricingError> {
    let mut seen = HashSet::new();
    option_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| service.option(id))
        .try_fold(0, |sum, option| add_cents(sum, option.price))
}

/// Pack price for one animal: flat prices already cover every session
fn collective_pack_price(formule: &FormuleData) -> Result<Cents, PricingError> {
    let sessions = i64::from(formule.sessions());
    match formule.unit {
        PriceUnit::Flat => Ok(formule.price),
        PriceUnit::Hour => {
            let minutes = i64::from(formule.duration_minutes.unwrap_or(60))
                .checked_mul(sessions)
                .ok_or(PricingError::AmountOverflow)?;
            prorate(formule.price, minutes, 60)
        }
        _ => mul_cents(formule.price, sessions),
    }
}

fn single_day_amount(
    service: &ServiceData,
    formule: &FormuleData,
    selection: &BookingSelection,
    rates: &DayRates,
    policy: &BillingPolicy,
    settings: &PricingSettings,
) -> Result<Cents, PricingError> {
    // Fixed-duration formulas cost their price whatever the clock times
    if service.enable_duration_based_blocking && formule.duration_minutes.is_some() {
        return Ok(if formule.price > 0 {
            formule.price
        } else {
            get_formule_price(formule, service.pricing_mode())
                .map(|(price, _)| price)
                .unwrap_or(0)
        });
    }

    match (selection.start_time, selection.end_time) {
        (Some(start), Some(end)) => calculate_partial_day_amount(start.minutes_until(end), rates, policy),
        _ => calculate_partial_day_amount(settings.workday_minutes(), rates, policy),
    }
}

fn multi_day_split(
    total_days: i64,
    selection: &BookingSelection,
    rates: &DayRates,
    policy: &BillingPolicy,
    settings: &PricingSettings,
) -> Result<DaySplit, PricingError> {
    let first_start = selection.start_time.unwrap_or(settings.day_start);
    let last_end = selection.end_time.unwrap_or(settings.day_end);

    let first = calculate_partial_day_amount(first_start.minutes_until(settings.day_end), rates, policy)?;
    let last = calculate_partial_day_amount(settings.day_start.minutes_until(last_end), rates, policy)?;
    let full_days = total_days - 2;

    Ok(DaySplit {
        first,
        full_days,
        full_days_amount: mul_cents(rates.full_day_rate(), full_days)?,
        last,
    })
}

struct DaySplit {
    first: Cents,
    full_days: i64,
    full_days_amount: Cents,
    last: Cents,
}

impl DaySplit {
    fn single(amount: Cents) -> Self {
        Self {
            first: amount,
            full_days: 0,
            full_days_amount: 0,
            last: 0,
        }
    }

    fn base(&self) -> Result<Cents, PricingError> {
        add_cents(add_cents(self.first, self.full_days_amount)?, self.last)
    }
}

fn assemble(
    total_days: i64,
    split: DaySplit,
    nights: i64,
    nights_amount: Cents,
    options_amount: Cents,
    commission_rate: Decimal,
) -> Result<PriceBreakdown, PricingError> {
    let base_amount = split.base()?;
    let subtotal = add_cents(add_cents(base_amount, nights_amount)?, options_amount)?;
    let commission = calculate_commission(subtotal, commission_rate)?;

    Ok(PriceBreakdown {
        total_days,
        base_amount,
        first_day_amount: split.first,
        full_days: split.full_days,
        full_days_amount: split.full_days_amount,
        last_day_amount: split.last,
        nights,
        nights_amount,
        options_amount,
        subtotal,
        commission_rate,
        commission,
        total: add_cents(subtotal, commission)?,
    })
}
