use serde::{Deserialize, Serialize};

// The email is the one business key a customer has; there is no separate id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
