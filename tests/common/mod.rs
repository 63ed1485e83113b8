use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use limpia_core::domain::{Property, RateType, ServiceRecord};

pub fn hourly_usd_property(rate: f64, refresh_rate: f64) -> Property {
    Property::new("Villa Azul", "Acme Rentals", rate, RateType::HourlyUsd, refresh_rate)
}

pub fn record_at(property: &Property, when: DateTime<Utc>, hours: f64) -> ServiceRecord {
    ServiceRecord::new(property.id, Uuid::new_v4(), when, hours)
}

/// Midday UTC timestamp: always the same calendar day in the anchor zone.
pub fn midday(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 17, 0, 0).unwrap()
}
