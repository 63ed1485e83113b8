//! Property rate plans: the billing contract for each client site.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Billing mode attached to a property, stored under the tags the upstream
/// datastore uses. Tags that do not match a known mode are carried verbatim
/// in [`RateType::Unknown`] so the billing layer can flag them instead of
/// silently billing zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RateType {
    HourlyUsd,
    HourlyFl,
    DailyUsd,
    DailyFl,
    PerAptFl,
    Unknown(String),
}

impl RateType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "HOURLY_USD" => RateType::HourlyUsd,
            "HOURLY_FL" => RateType::HourlyFl,
            "DAILY_USD" => RateType::DailyUsd,
            "DAILY_FL" => RateType::DailyFl,
            "PER_APT_FL" => RateType::PerAptFl,
            other => RateType::Unknown(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            RateType::HourlyUsd => "HOURLY_USD",
            RateType::HourlyFl => "HOURLY_FL",
            RateType::DailyUsd => "DAILY_USD",
            RateType::DailyFl => "DAILY_FL",
            RateType::PerAptFl => "PER_APT_FL",
            RateType::Unknown(tag) => tag,
        }
    }

    pub fn is_hourly(&self) -> bool {
        matches!(self, RateType::HourlyUsd | RateType::HourlyFl)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RateType::Unknown(_))
    }

    /// Currency follows the rate-type tag: USD modes bill in dollars,
    /// everything else in florins.
    pub fn currency(&self) -> Currency {
        if self.as_tag().contains("USD") {
            Currency::Usd
        } else {
            Currency::Florin
        }
    }
}

impl From<String> for RateType {
    fn from(tag: String) -> Self {
        RateType::from_tag(&tag)
    }
}

impl From<RateType> for String {
    fn from(rate_type: RateType) -> Self {
        rate_type.as_tag().to_string()
    }
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// One of the two currencies the business bills in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Florin,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Florin => "FL",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Whether tax applies by default to the client relationship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaxStatus {
    #[serde(rename = "WITH_TAX")]
    WithTax,
    #[serde(rename = "WITHOUT_TAX")]
    WithoutTax,
}

impl TaxStatus {
    pub fn applies(&self) -> bool {
        matches!(self, TaxStatus::WithTax)
    }
}

impl fmt::Display for TaxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaxStatus::WithTax => "With Tax",
            TaxStatus::WithoutTax => "Without Tax",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub name: String,
    pub client_name: String,
    pub regular_rate: f64,
    pub rate_type: RateType,
    pub refresh_rate: f64,
    /// Descriptive label only; never used in amount computation.
    pub standard_hours: String,
    pub tax_status: TaxStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn new(
        name: impl Into<String>,
        client_name: impl Into<String>,
        regular_rate: f64,
        rate_type: RateType,
        refresh_rate: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            client_name: client_name.into(),
            regular_rate,
            rate_type,
            refresh_rate,
            standard_hours: String::new(),
            tax_status: TaxStatus::WithoutTax,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_tax_status(mut self, tax_status: TaxStatus) -> Self {
        self.tax_status = tax_status;
        self
    }

    pub fn with_standard_hours(mut self, standard_hours: impl Into<String>) -> Self {
        self.standard_hours = standard_hours.into();
        self
    }

    pub fn currency(&self) -> Currency {
        self.rate_type.currency()
    }
}

impl Identifiable for Property {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Stamped for Property {
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Displayable for Property {
    fn display_label(&self) -> String {
        format!("{} - {}", self.name, self.client_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_type_round_trips_known_tags() {
        for tag in ["HOURLY_USD", "HOURLY_FL", "DAILY_USD", "DAILY_FL", "PER_APT_FL"] {
            let parsed = RateType::from_tag(tag);
            assert!(parsed.is_known(), "{tag} should parse to a known mode");
            assert_eq!(parsed.as_tag(), tag);
        }
    }

    #[test]
    fn unexpected_tag_is_preserved_as_unknown() {
        let parsed = RateType::from_tag("WEEKLY_EUR");
        assert_eq!(parsed, RateType::Unknown("WEEKLY_EUR".into()));
        assert_eq!(parsed.as_tag(), "WEEKLY_EUR");
    }

    #[test]
    fn currency_follows_tag() {
        assert_eq!(RateType::HourlyUsd.currency(), Currency::Usd);
        assert_eq!(RateType::DailyUsd.currency(), Currency::Usd);
        assert_eq!(RateType::HourlyFl.currency(), Currency::Florin);
        assert_eq!(RateType::PerAptFl.currency(), Currency::Florin);
    }

    #[test]
    fn only_hourly_modes_are_hourly() {
        assert!(RateType::HourlyUsd.is_hourly());
        assert!(RateType::HourlyFl.is_hourly());
        assert!(!RateType::DailyUsd.is_hourly());
        assert!(!RateType::PerAptFl.is_hourly());
        assert!(!RateType::Unknown("WEEKLY_EUR".into()).is_hourly());
    }

    #[test]
    fn tax_status_defaults_off_and_can_be_set() {
        let property = Property::new("Villa Azul", "Acme Rentals", 20.0, RateType::HourlyUsd, 15.0)
            .with_standard_hours("9:00 - 13:00");
        assert!(!property.tax_status.applies());
        assert_eq!(property.standard_hours, "9:00 - 13:00");
        let taxed = property.with_tax_status(TaxStatus::WithTax);
        assert!(taxed.tax_status.applies());
    }

    #[test]
    fn rate_type_serializes_as_plain_tag() {
        let json = serde_json::to_string(&RateType::PerAptFl).unwrap();
        assert_eq!(json, "\"PER_APT_FL\"");
        let back: RateType = serde_json::from_str("\"HOURLY_FL\"").unwrap();
        assert_eq!(back, RateType::HourlyFl);
    }
}
