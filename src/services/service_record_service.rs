//! Business logic helpers for managing service records.

use uuid::Uuid;

use crate::access::Actor;
use crate::billing::service_amount;
use crate::domain::{ServiceRecord, Stamped};
use crate::registry::Registry;
use crate::services::{ServiceError, ServiceResult};

/// Provides validated, capability-checked CRUD helpers for service records.
///
/// The persisted `total_amount` is recomputed through the rate engine on every
/// insert and edit so the stored copy never drifts from the rate plan.
pub struct ServiceRecordService;

impl ServiceRecordService {
    /// Adds a new service record and returns its identifier.
    pub fn add(
        registry: &mut Registry,
        actor: &Actor,
        mut record: ServiceRecord,
    ) -> ServiceResult<Uuid> {
        if !actor.can_edit_record(&record) {
            return Err(ServiceError::Forbidden(
                "employees may only log their own current or future services".into(),
            ));
        }
        validate(registry, &record)?;
        let property = registry
            .property(record.property_id)
            .ok_or_else(|| ServiceError::Invalid("Property not found".into()))?;
        record.total_amount = service_amount(&record, property)?;
        Ok(registry.add_service(record))
    }

    /// Updates the record identified by `id` via the provided mutator.
    pub fn update<F>(registry: &mut Registry, actor: &Actor, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut ServiceRecord),
    {
        let existing = registry
            .service(id)
            .ok_or_else(|| ServiceError::Invalid("Service record not found".into()))?;
        if !actor.can_edit_record(existing) {
            return Err(ServiceError::Forbidden(
                "employees may only edit their own current or future services".into(),
            ));
        }

        let mut updated = existing.clone();
        mutator(&mut updated);
        validate(registry, &updated)?;
        let property = registry
            .property(updated.property_id)
            .ok_or_else(|| ServiceError::Invalid("Property not found".into()))?;
        updated.total_amount = service_amount(&updated, property)?;
        updated.touch();

        *registry
            .service_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Service record not found".into()))? = updated;
        registry.touch();
        Ok(())
    }

    /// Removes the record identified by `id`, returning the removed instance.
    pub fn remove(registry: &mut Registry, actor: &Actor, id: Uuid) -> ServiceResult<ServiceRecord> {
        let existing = registry
            .service(id)
            .ok_or_else(|| ServiceError::Invalid("Service record not found".into()))?;
        if !actor.can_edit_record(existing) {
            return Err(ServiceError::Forbidden(
                "employees may only delete their own current or future services".into(),
            ));
        }
        registry
            .remove_service(id)
            .ok_or_else(|| ServiceError::Invalid("Service record not found".into()))
    }

    /// Lists the records the actor may see: everything for administrators,
    /// the employee's own current and future records otherwise.
    pub fn list<'a>(registry: &'a Registry, actor: &Actor) -> Vec<&'a ServiceRecord> {
        registry
            .services
            .iter()
            .filter(|record| actor.is_admin() || actor.can_edit_record(record))
            .collect()
    }
}

fn validate(registry: &Registry, record: &ServiceRecord) -> ServiceResult<()> {
    if record.hours_worked < 0.0 {
        return Err(ServiceError::Invalid(
            "hours worked must be non-negative".into(),
        ));
    }
    if record.laundry_fee < 0.0 || record.refresh_fee < 0.0 {
        return Err(ServiceError::Invalid("fees must be non-negative".into()));
    }
    if registry.employee(record.employee_id).is_none() {
        return Err(ServiceError::Invalid("Employee not found".into()));
    }
    Ok(())
}
