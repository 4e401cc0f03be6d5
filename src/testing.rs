//! Builders for unit tests

use chrono::NaiveDate;

use crate::models::{ClockTime, FormuleData, LocationMode, PriceUnit, ServiceData};

pub fn formule(id: &str) -> FormuleData {
    FormuleData {
        id: id.to_string(),
        name: String::new(),
        price: 0,
        unit: PriceUnit::Flat,
        pricing: None,
        duration_minutes: None,
        number_of_sessions: None,
        session_interval_days: None,
        is_collective: false,
        capacity: None,
        accepted_animals: Vec::new(),
        location: LocationMode::AnnouncerHome,
        overnight_price: None,
    }
}

pub fn service(id: &str, category: &str) -> ServiceData {
    ServiceData {
        id: id.to_string(),
        announcer_id: None,
        category: category.to_string(),
        name: String::new(),
        formules: Vec::new(),
        options: Vec::new(),
        allowed_billing_units: Vec::new(),
        enable_duration_based_blocking: false,
        buffer_before_minutes: 0,
        buffer_after_minutes: 0,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(s: &str) -> ClockTime {
    s.parse().unwrap()
}
