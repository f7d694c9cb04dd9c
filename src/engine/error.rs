use thiserror::Error;

use crate::models::Section;

/// Everything the booking engine can refuse to do. All variants are expected,
/// recoverable conditions handed back to the transport layer; the engine never
/// panics on bad input and never retries on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("customer {0} already holds a ticket")]
    DuplicateCustomer(String),
    #[error("price {0} does not fall into any section's price band")]
    InvalidPriceRange(u64),
    #[error("no seats left in section {0}")]
    NoSeatsAvailable(Section),
    #[error("section must be either A or B, got {0:?}")]
    InvalidSection(String),
    #[error("no ticket found for customer with email {0}")]
    CustomerNotFound(String),
}
