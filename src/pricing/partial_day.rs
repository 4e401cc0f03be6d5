//! Partial-day billing.
//!
//! A booked day shorter than the configured workday is billed by the hour,
//! the half day or the full day depending on what the announcer allows. An
//! hourly charge never exceeds the daily rate.

use crate::models::{BillingUnit, Cents, FormuleData, PriceUnit, ServiceData};

use super::money::prorate;
use super::services::PricingError;
use super::settings::PricingSettings;
use super::units::get_formule_price;

/// Rates available for billing one day of a formula
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayRates {
    pub hourly: Option<Cents>,
    pub half_daily: Option<Cents>,
    pub daily: Option<Cents>,
    /// Unit-priority price, used when neither hourly nor daily rate exists
    pub fallback: Option<Cents>,
}

impl DayRates {
    /// Rates of a formula. Without an explicit daily rate, a full workday at
    /// the hourly rate stands in for it.
    pub fn for_formule(
        service: &ServiceData,
        formule: &FormuleData,
        policy: &BillingPolicy,
    ) -> Result<Self, PricingError> {
        let table = formule.pricing.as_ref();
        let flat = |unit: PriceUnit| (formule.unit == unit && formule.price > 0).then_some(formule.price);

        let hourly = table
            .and_then(|t| t.get(PriceUnit::Hour))
            .or_else(|| flat(PriceUnit::Hour));
        let daily = match table.and_then(|t| t.get(PriceUnit::Day)).or_else(|| flat(PriceUnit::Day)) {
            Some(daily) => Some(daily),
            None => hourly
                .map(|hourly| prorate(hourly, policy.workday_minutes, 60))
                .transpose()?,
        };

        Ok(Self {
            hourly,
            half_daily: table.and_then(|t| t.half_daily).filter(|v| *v > 0),
            daily,
            fallback: get_formule_price(formule, service.pricing_mode()).map(|(price, _)| price),
        })
    }

    /// Explicit half-day rate, otherwise half the daily rate
    pub fn half_day_rate(&self) -> Result<Option<Cents>, PricingError> {
        match self.half_daily {
            Some(rate) => Ok(Some(rate)),
            None => self.daily.map(|daily| prorate(daily, 1, 2)).transpose(),
        }
    }

    pub fn full_day_rate(&self) -> Cents {
        self.daily.or(self.fallback).unwrap_or(0)
    }
}

/// Which partial-day units apply, and the workday boundaries in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPolicy {
    pub workday_minutes: i64,
    pub half_day_minutes: i64,
    pub hourly_allowed: bool,
    pub half_day_allowed: bool,
}

impl BillingPolicy {
    pub fn for_service(service: &ServiceData, settings: &PricingSettings) -> Self {
        Self {
            workday_minutes: settings.workday_minutes(),
            half_day_minutes: settings.half_day_minutes(),
            hourly_allowed: service.allows(BillingUnit::Hour),
            half_day_allowed: service.allows(BillingUnit::HalfDay),
        }
    }
}

/// Amount billed for `minutes` of service within one day.
///
/// Negative durations (end before start) are billed as zero minutes.
pub fn calculate_partial_day_amount(
    minutes: i64,
    rates: &DayRates,
    policy: &BillingPolicy,
) -> Result<Cents, PricingError> {
    if minutes < 0 {
        tracing::debug!(minutes, "negative duration clamped to zero");
    }
    let minutes = minutes.max(0);

    if let Some(daily) = rates.daily {
        if minutes >= policy.workday_minutes {
            return Ok(daily);
        }

        if !policy.hourly_allowed {
            if policy.half_day_allowed && minutes <= policy.half_day_minutes {
                return Ok(rates.half_day_rate()?.unwrap_or(daily));
            }
            return Ok(daily);
        }
    }

    if policy.hourly_allowed {
        if let Some(hourly) = rates.hourly {
            let amount = prorate(hourly, minutes, 60)?;
            return Ok(match rates.daily {
                Some(daily) => amount.min(daily),
                None => amount,
            });
        }
    }

    Ok(rates.full_day_rate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricingTable;
    use crate::testing;

    fn rates(hourly: Option<Cents>, daily: Option<Cents>) -> DayRates {
        DayRates {
            hourly,
            half_daily: None,
            daily,
            fallback: daily.or(hourly),
        }
    }

    fn policy(hourly_allowed: bool, half_day_allowed: bool) -> BillingPolicy {
        BillingPolicy {
            workday_minutes: 8 * 60,
            half_day_minutes: 4 * 60,
            hourly_allowed,
            half_day_allowed,
        }
    }

    #[test]
    fn test_hourly_examples() {
        let r = rates(Some(2000), Some(10000));
        let p = policy(true, true);
        assert_eq!(calculate_partial_day_amount(5 * 60, &r, &p), Ok(10000));
        assert_eq!(calculate_partial_day_amount(3 * 60, &r, &p), Ok(6000));
    }

    #[test]
    fn test_full_workday_is_exactly_daily_rate() {
        let r = rates(Some(1500), Some(10000));
        let p = policy(true, true);
        assert_eq!(calculate_partial_day_amount(8 * 60, &r, &p), Ok(10000));
        assert_eq!(calculate_partial_day_amount(11 * 60, &r, &p), Ok(10000));
    }

    #[test]
    fn test_hourly_never_exceeds_daily() {
        let r = rates(Some(1700), Some(9000));
        let p = policy(true, false);
        for minutes in (0..=24 * 60).step_by(15) {
            assert!(calculate_partial_day_amount(minutes, &r, &p).unwrap() <= 9000);
        }
    }

    #[test]
    fn test_hourly_rounding_half_away_from_zero() {
        // 1030 * 45 / 60 = 772.5 -> 773
        let r = rates(Some(1030), None);
        assert_eq!(calculate_partial_day_amount(45, &r, &policy(true, true)), Ok(773));
    }

    #[test]
    fn test_hourly_only_formula_gets_workday_daily_rate() {
        let mut formule = testing::formule("walk");
        formule.pricing = Some(PricingTable {
            hourly: Some(2000),
            ..Default::default()
        });
        let service = testing::service("svc", "promenade");
        let p = policy(true, true);

        let r = DayRates::for_formule(&service, &formule, &p).unwrap();
        assert_eq!(r.daily, Some(16000));
        assert_eq!(r.full_day_rate(), 16000);
        // 12h hits the workday rule, 3h stays hourly
        assert_eq!(calculate_partial_day_amount(12 * 60, &r, &p), Ok(16000));
        assert_eq!(calculate_partial_day_amount(3 * 60, &r, &p), Ok(6000));
    }

    #[test]
    fn test_explicit_daily_rate_is_kept() {
        let mut formule = testing::formule("walk");
        formule.pricing = Some(PricingTable {
            hourly: Some(2000),
            daily: Some(10000),
            ..Default::default()
        });
        let service = testing::service("svc", "promenade");
        let r = DayRates::for_formule(&service, &formule, &policy(true, true)).unwrap();
        assert_eq!(r.daily, Some(10000));
    }

    #[test]
    fn test_huge_hourly_rate_overflows() {
        let r = rates(Some(i64::MAX / 2), None);
        assert_eq!(
            calculate_partial_day_amount(3 * 60, &r, &policy(true, true)),
            Err(PricingError::AmountOverflow)
        );
    }

    #[test]
    fn test_half_day_when_hourly_disallowed() {
        let r = rates(Some(2000), Some(10000));
        let p = policy(false, true);
        assert_eq!(calculate_partial_day_amount(3 * 60, &r, &p), Ok(5000));
        assert_eq!(calculate_partial_day_amount(4 * 60, &r, &p), Ok(5000));
        assert_eq!(calculate_partial_day_amount(4 * 60 + 1, &r, &p), Ok(10000));
    }

    #[test]
    fn test_explicit_half_day_rate() {
        let r = DayRates {
            half_daily: Some(5500),
            ..rates(None, Some(10000))
        };
        assert_eq!(calculate_partial_day_amount(120, &r, &policy(false, true)), Ok(5500));
    }

    #[test]
    fn test_full_day_only() {
        let r = rates(Some(2000), Some(10000));
        let p = policy(false, false);
        assert_eq!(calculate_partial_day_amount(60, &r, &p), Ok(10000));
    }

    #[test]
    fn test_zero_and_negative_minutes() {
        let r = rates(Some(2000), Some(10000));
        assert_eq!(calculate_partial_day_amount(0, &r, &policy(true, true)), Ok(0));
        assert_eq!(calculate_partial_day_amount(-90, &r, &policy(true, true)), Ok(0));
        assert_eq!(calculate_partial_day_amount(-90, &r, &policy(false, false)), Ok(10000));
    }

    #[test]
    fn test_fallback_without_rates() {
        let r = DayRates {
            fallback: Some(30000),
            ..Default::default()
        };
        assert_eq!(calculate_partial_day_amount(60, &r, &policy(true, true)), Ok(30000));
        assert_eq!(calculate_partial_day_amount(60, &DayRates::default(), &policy(true, true)), Ok(0));
    }
}
