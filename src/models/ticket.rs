use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Customer;

/// Receipt for a completed purchase. Owned by the booking engine; the seat
/// field is the only mutable part, and only through the modify-seat operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub origin: String,
    pub destination: String,
    pub price_paid: u64,
    pub seat: String,
    pub purchased_at: DateTime<Utc>,
}

// (customer, seat) pair as returned by the section and list-all queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatedCustomer {
    pub customer: Customer,
    pub seat: String,
}
