//! The registry: in-memory store of properties, employees, and service
//! records for one business workspace, persistence-friendly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Employee, Property, ServiceRecord};

const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub services: Vec<ServiceRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Registry::schema_version_default")]
    pub schema_version: u8,
}

impl Registry {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            properties: Vec::new(),
            employees: Vec::new(),
            services: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_property(&mut self, property: Property) -> Uuid {
        let id = property.id;
        self.properties.push(property);
        self.touch();
        id
    }

    pub fn add_employee(&mut self, employee: Employee) -> Uuid {
        let id = employee.id;
        self.employees.push(employee);
        self.touch();
        id
    }

    pub fn add_service(&mut self, service: ServiceRecord) -> Uuid {
        let id = service.id;
        self.services.push(service);
        self.touch();
        id
    }

    pub fn property(&self, id: Uuid) -> Option<&Property> {
        self.properties.iter().find(|property| property.id == id)
    }

    pub fn property_mut(&mut self, id: Uuid) -> Option<&mut Property> {
        self.properties.iter_mut().find(|property| property.id == id)
    }

    pub fn employee(&self, id: Uuid) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    pub fn employee_mut(&mut self, id: Uuid) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|employee| employee.id == id)
    }

    pub fn service(&self, id: Uuid) -> Option<&ServiceRecord> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn service_mut(&mut self, id: Uuid) -> Option<&mut ServiceRecord> {
        self.services.iter_mut().find(|service| service.id == id)
    }

    pub fn remove_service(&mut self, id: Uuid) -> Option<ServiceRecord> {
        let index = self.services.iter().position(|service| service.id == id)?;
        let removed = self.services.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
