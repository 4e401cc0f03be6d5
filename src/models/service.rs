//! Catalog models: services, formulas (variants) and add-on options.
//!
//! These mirror the records the hosted backend returns for an announcer's
//! profile. Prices are integer cents.

use serde::{Deserialize, Serialize};

use super::animal::AnimalType;

/// Integer minor-currency units (euro cents)
pub type Cents = i64;

/// Unit a displayed or stored price applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceUnit {
    Hour,
    Day,
    Week,
    Month,
    Flat,
}

impl PriceUnit {
    /// French label shown after a price ("20,00 € / heure")
    pub fn label(self) -> &'static str {
        match self {
            PriceUnit::Hour => "heure",
            PriceUnit::Day => "jour",
            PriceUnit::Week => "semaine",
            PriceUnit::Month => "mois",
            PriceUnit::Flat => "",
        }
    }
}

/// Units an announcer accepts for billing a partial day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingUnit {
    Hour,
    HalfDay,
    Day,
}

/// Whether a category is billed by the day (boarding, day-care) or per visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    Garde,
    Punctual,
}

impl PricingMode {
    /// Resolve the pricing mode from a category slug ("garde", "garde-nuit", "promenade"...)
    pub fn from_category(slug: &str) -> Self {
        if slug.trim().to_ascii_lowercase().starts_with("garde") {
            PricingMode::Garde
        } else {
            PricingMode::Punctual
        }
    }
}

/// Where the service takes place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationMode {
    #[default]
    AnnouncerHome,
    ClientHome,
    Both,
}

/// Tiered prices of a formula, all optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTable {
    #[serde(default)]
    pub hourly: Option<Cents>,
    #[serde(default)]
    pub half_daily: Option<Cents>,
    #[serde(default)]
    pub daily: Option<Cents>,
    #[serde(default)]
    pub weekly: Option<Cents>,
    #[serde(default)]
    pub monthly: Option<Cents>,
}

impl PricingTable {
    /// Price for a unit, ignoring zero or negative entries
    pub fn get(&self, unit: PriceUnit) -> Option<Cents> {
        let value = match unit {
            PriceUnit::Hour => self.hourly,
            PriceUnit::Day => self.daily,
            PriceUnit::Week => self.weekly,
            PriceUnit::Month => self.monthly,
            PriceUnit::Flat => None,
        };
        value.filter(|v| *v > 0)
    }
}

/// One purchasable variant of a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormuleData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Flat price in cents, interpreted with `unit`
    #[serde(default)]
    pub price: Cents,
    #[serde(default = "default_unit")]
    pub unit: PriceUnit,
    #[serde(default)]
    pub pricing: Option<PricingTable>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub number_of_sessions: Option<u32>,
    #[serde(default)]
    pub session_interval_days: Option<u32>,
    #[serde(default)]
    pub is_collective: bool,
    /// Animals per collective slot
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub accepted_animals: Vec<AnimalType>,
    #[serde(default)]
    pub location: LocationMode,
    /// Price per night when the booking includes overnight stays
    #[serde(default)]
    pub overnight_price: Option<Cents>,
}

fn default_unit() -> PriceUnit {
    PriceUnit::Flat
}

impl FormuleData {
    pub fn sessions(&self) -> u32 {
        self.number_of_sessions.unwrap_or(1).max(1)
    }

    /// Empty list means every species is welcome
    pub fn accepts(&self, species: AnimalType) -> bool {
        self.accepted_animals.is_empty() || self.accepted_animals.contains(&species)
    }
}

/// Flat-fee add-on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price: Cents,
}

/// A bookable service category offered by an announcer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceData {
    pub id: String,
    #[serde(default)]
    pub announcer_id: Option<String>,
    /// Category slug, decides the pricing mode
    pub category: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub formules: Vec<FormuleData>,
    #[serde(default)]
    pub options: Vec<OptionData>,
    #[serde(default)]
    pub allowed_billing_units: Vec<BillingUnit>,
    #[serde(default)]
    pub enable_duration_based_blocking: bool,
    #[serde(default)]
    pub buffer_before_minutes: u32,
    #[serde(default)]
    pub buffer_after_minutes: u32,
}

impl ServiceData {
    pub fn pricing_mode(&self) -> PricingMode {
        PricingMode::from_category(&self.category)
    }

    pub fn formule(&self, id: &str) -> Option<&FormuleData> {
        self.formules.iter().find(|f| f.id == id)
    }

    pub fn option(&self, id: &str) -> Option<&OptionData> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Empty configuration allows every unit
    pub fn allows(&self, unit: BillingUnit) -> bool {
        self.allowed_billing_units.is_empty() || self.allowed_billing_units.contains(&unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_mode_from_category() {
        assert_eq!(PricingMode::from_category("garde"), PricingMode::Garde);
        assert_eq!(PricingMode::from_category("Garde-Nuit"), PricingMode::Garde);
        assert_eq!(PricingMode::from_category("promenade"), PricingMode::Punctual);
        assert_eq!(PricingMode::from_category(""), PricingMode::Punctual);
    }

    #[test]
    fn test_pricing_table_ignores_non_positive() {
        let table = PricingTable {
            hourly: Some(0),
            daily: Some(-10),
            weekly: Some(30000),
            ..Default::default()
        };
        assert_eq!(table.get(PriceUnit::Hour), None);
        assert_eq!(table.get(PriceUnit::Day), None);
        assert_eq!(table.get(PriceUnit::Week), Some(30000));
        assert_eq!(table.get(PriceUnit::Flat), None);
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(PriceUnit::Day.label(), "jour");
        assert_eq!(PriceUnit::Hour.label(), "heure");
        assert_eq!(PriceUnit::Week.label(), "semaine");
        assert_eq!(PriceUnit::Month.label(), "mois");
        assert_eq!(PriceUnit::Flat.label(), "");
    }

    #[test]
    fn test_service_deserializes_with_defaults() {
        let service: ServiceData = serde_json::from_value(serde_json::json!({
            "id": "svc-1",
            "category": "garde",
            "formules": [{ "id": "f-1", "price": 2500, "unit": "day" }],
            "allowed_billing_units": ["half_day", "day"]
        }))
        .unwrap();

        let formule = service.formule("f-1").unwrap();
        assert_eq!(formule.unit, PriceUnit::Day);
        assert_eq!(formule.sessions(), 1);
        assert_eq!(formule.location, LocationMode::AnnouncerHome);
        assert!(!service.allows(BillingUnit::Hour));
        assert!(service.allows(BillingUnit::HalfDay));
    }
}
