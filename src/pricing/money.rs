//! Money rounding, commission and display helpers.
//!
//! Amounts are integer cents. Intermediate products go through `Decimal`
//! so that nothing is ever computed in floating point.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::models::Cents;

use super::services::PricingError;

/// Round a decimal amount of cents to whole cents, half away from zero.
///
/// Totals must match the web client bit for bit, so ties always round
/// away from zero, never to even.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use petsit_booking::pricing::round_cents;
///
/// assert_eq!(round_cents(dec!(2.5)), Ok(3));
/// assert_eq!(round_cents(dec!(3.5)), Ok(4));
/// assert_eq!(round_cents(dec!(-2.5)), Ok(-3));
/// assert_eq!(round_cents(dec!(1.49)), Ok(1));
/// ```
pub fn round_cents(amount: Decimal) -> Result<Cents, PricingError> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::AmountOverflow)
}

/// `round(amount * numerator / denominator)` without intermediate overflow.
/// Zero denominator yields 0.
pub fn prorate(amount: Cents, numerator: i64, denominator: i64) -> Result<Cents, PricingError> {
    if denominator == 0 {
        return Ok(0);
    }
    let product = Decimal::from(amount)
        .checked_mul(Decimal::from(numerator))
        .and_then(|p| p.checked_div(Decimal::from(denominator)))
        .ok_or(PricingError::AmountOverflow)?;
    round_cents(product)
}

pub fn mul_cents(amount: Cents, factor: i64) -> Result<Cents, PricingError> {
    amount.checked_mul(factor).ok_or(PricingError::AmountOverflow)
}

pub fn add_cents(a: Cents, b: Cents) -> Result<Cents, PricingError> {
    a.checked_add(b).ok_or(PricingError::AmountOverflow)
}

/// Platform commission on a base amount: `round(base * rate / 100)`
pub fn calculate_commission(base: Cents, rate: Decimal) -> Result<Cents, PricingError> {
    let share = Decimal::from(base)
        .checked_mul(rate)
        .ok_or(PricingError::AmountOverflow)?;
    round_cents(share / Decimal::ONE_HUNDRED)
}

/// Base amount plus platform commission
pub fn calculate_price_with_commission(base: Cents, rate: Decimal) -> Result<Cents, PricingError> {
    add_cents(base, calculate_commission(base, rate)?)
}

/// French display of an amount of cents: `4025 -> "40,25"`
pub fn format_price(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{},{:02}", sign, abs / 100, abs % 100)
}
