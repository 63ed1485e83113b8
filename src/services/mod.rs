//! Validated, capability-checked operations over a [`Registry`](crate::registry::Registry).

pub mod employee_service;
pub mod invoice_service;
pub mod property_service;
pub mod report_service;
pub mod service_record_service;

pub use employee_service::EmployeeService;
pub use invoice_service::InvoiceService;
pub use property_service::PropertyService;
pub use report_service::ReportService;
pub use service_record_service::ServiceRecordService;

use crate::errors::BillingError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Billing(#[from] BillingError),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("{0}")]
    Invalid(String),
}
