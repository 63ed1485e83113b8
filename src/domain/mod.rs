//! Domain models for properties, employees, and cleaning-service records.

pub mod common;
pub mod employee;
pub mod property;
pub mod service_record;

pub use common::{Displayable, Identifiable, Stamped};
pub use employee::{Employee, Role};
pub use property::{Currency, Property, RateType, TaxStatus};
pub use service_record::ServiceRecord;
