//! Business logic helpers for managing employees.

use uuid::Uuid;

use crate::access::Actor;
use crate::domain::{Employee, Stamped};
use crate::registry::Registry;
use crate::services::{ServiceError, ServiceResult};

pub struct EmployeeService;

impl EmployeeService {
    /// Adds a new employee and returns their identifier. Admin only.
    pub fn add(registry: &mut Registry, actor: &Actor, employee: Employee) -> ServiceResult<Uuid> {
        if !actor.is_admin() {
            return Err(ServiceError::Forbidden(
                "only administrators manage employees".into(),
            ));
        }
        if employee.first_name.trim().is_empty() && employee.last_name.trim().is_empty() {
            return Err(ServiceError::Invalid("employee name is required".into()));
        }
        Ok(registry.add_employee(employee))
    }

    /// Updates the employee identified by `id` via the provided mutator.
    pub fn update<F>(registry: &mut Registry, actor: &Actor, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Employee),
    {
        if !actor.is_admin() {
            return Err(ServiceError::Forbidden(
                "only administrators manage employees".into(),
            ));
        }
        let employee = registry
            .employee_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Employee not found".into()))?;
        mutator(employee);
        employee.touch();
        registry.touch();
        Ok(())
    }

    /// Marks an employee inactive without deleting their history.
    pub fn deactivate(registry: &mut Registry, actor: &Actor, id: Uuid) -> ServiceResult<()> {
        Self::update(registry, actor, id, |employee| employee.active = false)
    }

    /// Lists the employees the actor is allowed to see: all of them for
    /// administrators, only themselves otherwise.
    pub fn list<'a>(registry: &'a Registry, actor: &Actor) -> Vec<&'a Employee> {
        registry
            .employees
            .iter()
            .filter(|employee| actor.can_view_all_employees() || employee.id == actor.employee_id)
            .collect()
    }
}
