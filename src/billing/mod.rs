//! Rate engine: derives the billable amount for a single service record from
//! its property's rate plan, plus hours-summary helpers used by reporting.
//!
//! Everything here is pure and deterministic; callers feed in already-loaded
//! records and read back numbers.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::dates::anchor_date;
use crate::domain::{Property, RateType, ServiceRecord};
use crate::errors::BillingError;
use crate::format::format_hours_minutes;

/// Tax applied to invoices when requested. Overridable per invoice through
/// `InvoiceOptions::tax_rate`.
pub const DEFAULT_TAX_RATE: f64 = 0.07;

/// Rounds a monetary value to cents.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Hourly amount computed on a minute-exact split: whole hours at the full
/// rate plus the fractional remainder at the per-minute rate. Keeps the
/// "Xh Ym" breakdown and the billed amount in agreement to the minute.
pub fn exact_hourly_amount(hours: f64, rate: f64) -> f64 {
    let whole_hours = hours.floor();
    let minutes = (hours - whole_hours) * 60.0;
    let minute_rate = rate / 60.0;
    whole_hours * rate + minutes * minute_rate
}

/// Billable amount for one service record under `property`'s rate plan.
///
/// Cases in order: refresh services bill flat at the refresh rate; hourly
/// plans bill the minute-exact hourly amount; daily and per-apartment plans
/// bill the regular rate regardless of hours. An unrecognized rate type is a
/// data-integrity fault and is surfaced instead of billed as zero.
pub fn service_amount(record: &ServiceRecord, property: &Property) -> Result<f64, BillingError> {
    if record.is_refresh_service {
        return Ok(property.refresh_rate);
    }
    match &property.rate_type {
        RateType::HourlyUsd | RateType::HourlyFl => {
            Ok(exact_hourly_amount(record.hours_worked, property.regular_rate))
        }
        RateType::DailyUsd | RateType::DailyFl | RateType::PerAptFl => Ok(property.regular_rate),
        RateType::Unknown(tag) => Err(BillingError::UnknownRateType {
            property: property.name.clone(),
            rate_type: tag.clone(),
        }),
    }
}

/// Total hours worked across `records` on one anchor-zone calendar day.
pub fn daily_hours(records: &[ServiceRecord], date: NaiveDate) -> f64 {
    records
        .iter()
        .filter(|record| anchor_date(record.service_date) == date)
        .map(|record| record.hours_worked)
        .sum()
}

/// Hours summary for one employee over one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyHours {
    pub total_hours: f64,
    pub total_formatted: String,
    pub daily: BTreeMap<NaiveDate, f64>,
}

/// Sums an employee's hours for the given anchor-zone month, broken down per
/// day for timesheet display.
pub fn employee_monthly_hours(
    records: &[ServiceRecord],
    employee_id: Uuid,
    year: i32,
    month: u32,
) -> MonthlyHours {
    let mut daily = BTreeMap::new();
    let mut total_hours = 0.0;

    for record in records {
        if record.employee_id != employee_id {
            continue;
        }
        let day = anchor_date(record.service_date);
        if day.year() != year || day.month() != month {
            continue;
        }
        *daily.entry(day).or_insert(0.0) += record.hours_worked;
        total_hours += record.hours_worked;
    }

    MonthlyHours {
        total_hours,
        total_formatted: format_hours_minutes(total_hours),
        daily,
    }
}
