// Debounced form-validation flows
pub mod address;
pub mod debounce;
pub mod name;

pub use address::{AddressField, AddressState, NO_COORDINATES_MESSAGE};
pub use debounce::Debouncer;
pub use name::{NameField, NameState, LOOKUP_FAILED_MESSAGE};
