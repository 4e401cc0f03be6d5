//! Domain models shared by the pricing and availability engines

pub mod animal;
pub mod booking;
pub mod calendar;
pub mod service;
pub mod time;

pub use animal::{Animal, AnimalType};
pub use booking::BookingSelection;
pub use calendar::{CalendarEntry, DayStatus};
pub use service::{
    BillingUnit, Cents, FormuleData, LocationMode, OptionData, PriceUnit, PricingMode,
    PricingTable, ServiceData,
};
pub use time::{ClockTime, TimeRange, MINUTES_PER_DAY};
