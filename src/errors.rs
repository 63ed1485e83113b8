use thiserror::Error;

/// Error type that captures common billing-core failures.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unknown rate type '{rate_type}' on property {property}")]
    UnknownRateType { property: String, rate_type: String },
}
