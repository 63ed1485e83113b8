//! Presentation helpers for hours, amounts, and rate-plan labels.
//!
//! These are display-only but bit-compatible with the documents the business
//! already sends out, so the exact strings are covered by tests.

use crate::domain::{Currency, RateType};

/// Renders decimal hours as `"Xh Ym"` with zero-padded minutes.
pub fn format_hours_minutes(hours: f64) -> String {
    let whole_hours = hours.floor();
    let minutes = ((hours - whole_hours) * 60.0).round() as u32;
    format!("{}h {:02}m", whole_hours as i64, minutes)
}

/// Currency-prefixed amount with two decimal places, e.g. `"$ 25.00"`.
pub fn format_amount(currency: Currency, amount: f64) -> String {
    format!("{} {:.2}", currency.symbol(), amount)
}

/// Spanish-language rate-plan label used on billing summaries, e.g.
/// `"20 USD x Hora"`.
pub fn format_rate_type(rate_type: &RateType, value: f64) -> String {
    match rate_type {
        RateType::HourlyUsd => format!("{value} USD x Hora"),
        RateType::HourlyFl => format!("{value} FL x Hora"),
        RateType::DailyUsd => format!("{value} USD x Día"),
        RateType::DailyFl => format!("{value} FL x Día"),
        RateType::PerAptFl => format!("{value} FL x Apto"),
        RateType::Unknown(tag) => format!("{value} {tag}"),
    }
}
