use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Owner not found: {0}")]
    OwnerNotFound(Uuid),
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),
    #[error("Tenant not found: {0}")]
    TenantNotFound(Uuid),
    #[error("Rental not found: {0}")]
    RentalNotFound(Uuid),
    #[error("Fee definition not found: {0}")]
    FeeDefinitionNotFound(Uuid),
    #[error("Payment not found: {0}")]
    PaymentNotFound(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}
