//! Capability checks for the command layer.
//!
//! The rate engine and aggregator are role-agnostic pure functions; every
//! mutation or invoice request instead carries an explicit [`Actor`] that the
//! service layer checks before touching the registry. Admins may do anything;
//! employees may only manage their own records dated today or later in the
//! anchor zone.

use uuid::Uuid;

use crate::dates::{anchor_date, today_in_anchor};
use crate::domain::{Role, ServiceRecord};

/// The authenticated caller on whose behalf a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub employee_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn admin(employee_id: Uuid) -> Self {
        Self {
            employee_id,
            role: Role::Admin,
        }
    }

    pub fn employee(employee_id: Uuid) -> Self {
        Self {
            employee_id,
            role: Role::Employee,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn can_generate_invoices(&self) -> bool {
        self.is_admin()
    }

    pub fn can_view_all_employees(&self) -> bool {
        self.is_admin()
    }

    pub fn can_manage_properties(&self) -> bool {
        self.is_admin()
    }

    /// Whether the actor may create, edit, or delete `record`.
    pub fn can_edit_record(&self, record: &ServiceRecord) -> bool {
        if self.is_admin() {
            return true;
        }
        record.employee_id == self.employee_id
            && anchor_date(record.service_date) >= today_in_anchor()
    }
}
