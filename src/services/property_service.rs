//! Business logic helpers for managing properties.

use uuid::Uuid;

use crate::access::Actor;
use crate::domain::{Property, Stamped};
use crate::registry::Registry;
use crate::services::{ServiceError, ServiceResult};

/// Provides validated CRUD helpers for property rate plans.
pub struct PropertyService;

impl PropertyService {
    /// Adds a new property and returns its identifier. Admin only.
    pub fn add(registry: &mut Registry, actor: &Actor, property: Property) -> ServiceResult<Uuid> {
        if !actor.can_manage_properties() {
            return Err(ServiceError::Forbidden(
                "only administrators manage properties".into(),
            ));
        }
        validate(&property)?;
        Ok(registry.add_property(property))
    }

    /// Updates the property identified by `id` via the provided mutator.
    pub fn update<F>(registry: &mut Registry, actor: &Actor, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Property),
    {
        if !actor.can_manage_properties() {
            return Err(ServiceError::Forbidden(
                "only administrators manage properties".into(),
            ));
        }
        let property = registry
            .property_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Property not found".into()))?;
        let mut updated = property.clone();
        mutator(&mut updated);
        updated.touch();
        validate(&updated)?;
        *property = updated;
        registry.touch();
        Ok(())
    }

    /// Returns a snapshot of the registry's properties.
    pub fn list(registry: &Registry) -> Vec<&Property> {
        registry.properties.iter().collect()
    }
}

fn validate(property: &Property) -> ServiceResult<()> {
    if property.name.trim().is_empty() {
        return Err(ServiceError::Invalid("property name is required".into()));
    }
    if property.regular_rate < 0.0 || property.refresh_rate < 0.0 {
        return Err(ServiceError::Invalid("rates must be non-negative".into()));
    }
    Ok(())
}
