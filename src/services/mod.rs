// Service exports
pub mod capability;
pub mod directory;
pub mod geocoder;
pub mod session;

pub use capability::{resolve_capability, AuthError, Capability};
pub use directory::{DirectoryClient, DirectoryError, NameLookup};
pub use geocoder::{Geocode, GeocodeError, GeocoderClient};
pub use session::{FormSession, SessionStore};
