//! Customer and address services on top of the storage gateway.

mod addresses;
mod customers;
mod validation;
pub use addresses::AddressService;
pub use customers::CustomerService;
pub use validation::{FieldErrors, RequestValidator, ROOT_FIELD};
