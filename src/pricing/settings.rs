//! Admin-configured pricing settings

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::ClockTime;

/// Platform-wide settings applied to every quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Commission percentage added on top of the announcer price
    pub commission_rate: Decimal,
    /// Hours in a full billable day
    pub workday_hours: Decimal,
    /// Hours up to which a half-day rate applies
    pub half_day_hours: Decimal,
    /// Default announcer day start, used for multi-day bookings
    pub day_start: ClockTime,
    pub day_end: ClockTime,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            commission_rate: dec!(15),
            workday_hours: dec!(8),
            half_day_hours: dec!(4),
            day_start: ClockTime::from_hm(8, 0).unwrap_or(ClockTime::MIDNIGHT),
            day_end: ClockTime::from_hm(20, 0).unwrap_or(ClockTime::END_OF_DAY),
        }
    }
}

impl PricingSettings {
    pub fn workday_minutes(&self) -> i64 {
        hours_to_minutes(self.workday_hours)
    }

    pub fn half_day_minutes(&self) -> i64 {
        hours_to_minutes(self.half_day_hours)
    }
}

fn hours_to_minutes(hours: Decimal) -> i64 {
    (hours * Decimal::from(60)).round().to_i64().unwrap_or(0)
}
