//! Pricing engine module for the booking flow.
//!
//! Provides the price breakdown of a booking selection, collective formula
//! pricing and "starting at" prices. The web client calls it via HTTP/JSON.

pub mod calculators;
pub mod money;
pub mod partial_day;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod settings;
pub mod units;

// Re-export commonly used items
pub use calculators::{
    calculate_collective_price, calculate_options_amount, calculate_price_breakdown,
    CollectivePrice, PriceBreakdown,
};
pub use money::{
    add_cents, calculate_commission, calculate_price_with_commission, format_price, mul_cents,
    prorate, round_cents,
};
pub use partial_day::{calculate_partial_day_amount, BillingPolicy, DayRates};
pub use routes::router;
pub use services::PricingError;
pub use settings::PricingSettings;
pub use units::{
    get_announcer_min_price, get_formule_best_price, get_formule_price, get_service_min_price,
    unit_priority,
};
