//! Hours reporting over the registry.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::access::Actor;
use crate::billing::{daily_hours, employee_monthly_hours, MonthlyHours};
use crate::registry::Registry;
use crate::services::{ServiceError, ServiceResult};

pub struct ReportService;

impl ReportService {
    /// Monthly hours summary for one employee. Employees may only request
    /// their own summary.
    pub fn monthly_hours(
        registry: &Registry,
        actor: &Actor,
        employee_id: Uuid,
        year: i32,
        month: u32,
    ) -> ServiceResult<MonthlyHours> {
        if !actor.can_view_all_employees() && actor.employee_id != employee_id {
            return Err(ServiceError::Forbidden(
                "employees may only view their own hours".into(),
            ));
        }
        if !(1..=12).contains(&month) {
            return Err(ServiceError::Invalid("month must be 1-12".into()));
        }
        if registry.employee(employee_id).is_none() {
            return Err(ServiceError::Invalid("Employee not found".into()));
        }
        Ok(employee_monthly_hours(
            &registry.services,
            employee_id,
            year,
            month,
        ))
    }

    /// Total hours worked across all employees on one anchor-zone day.
    pub fn hours_on(registry: &Registry, date: NaiveDate) -> f64 {
        daily_hours(&registry.services, date)
    }
}
