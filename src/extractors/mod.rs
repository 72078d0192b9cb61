pub mod id;
pub mod list_params;
pub mod payload;

pub use id::EntityId;
pub use list_params::ListParams;
pub use payload::Payload;
