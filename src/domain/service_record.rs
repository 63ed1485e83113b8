//! Service records: one cleaning event logged against a property.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: Uuid,
    pub property_id: Uuid,
    pub employee_id: Uuid,
    /// When the service is billed and grouped; comparisons happen on the
    /// anchor-zone calendar day derived from this timestamp.
    pub service_date: DateTime<Utc>,
    pub hours_worked: f64,
    /// Flat "refresh" services bill at the property's refresh rate instead of
    /// its normal rate plan.
    #[serde(default)]
    pub is_refresh_service: bool,
    /// Persisted copy of the computed billable amount. Derived, never
    /// authoritative; may be stale until recomputed through the rate engine.
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub laundry_fee: f64,
    #[serde(default)]
    pub refresh_fee: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceRecord {
    pub fn new(
        property_id: Uuid,
        employee_id: Uuid,
        service_date: DateTime<Utc>,
        hours_worked: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            property_id,
            employee_id,
            service_date,
            hours_worked,
            is_refresh_service: false,
            total_amount: 0.0,
            laundry_fee: 0.0,
            refresh_fee: 0.0,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn as_refresh(mut self) -> Self {
        self.is_refresh_service = true;
        self
    }
}

impl Identifiable for ServiceRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Stamped for ServiceRecord {
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Displayable for ServiceRecord {
    fn display_label(&self) -> String {
        format!(
            "service:{} on {}",
            self.id,
            self.service_date.format("%Y-%m-%d")
        )
    }
}
