//! Rows read from the store, validated inputs written to it, and the shapes returned to clients.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A customer row as stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

/// A customer row joined with the number of addresses it owns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CustomerWithCount {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address_count: i64,
}

/// Customer as returned by get and list: the counted row plus `onlyOneAddress`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: CustomerWithCount,
    #[serde(rename = "onlyOneAddress")]
    pub only_one_address: bool,
}

impl From<CustomerWithCount> for CustomerDetail {
    fn from(customer: CustomerWithCount) -> Self {
        let only_one_address = customer.address_count == 1;
        CustomerDetail {
            customer,
            only_one_address,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub id: i64,
    pub customer_id: i64,
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

/// Trimmed customer fields that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

/// Trimmed address fields that passed validation. The owner comes from the route, never the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressInput {
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}
