// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Restaurant, FilterCriteria, ResolvedAddress};
pub use requests::{DiscoverRequest, CreateSessionRequest, FieldInputRequest, GeocodeQuery, NameCheckQuery};
pub use responses::{RankedRestaurant, DiscoverResponse, GeocodeResponse, NameCheckResponse, SessionCreatedResponse, FormStateResponse, FormField, FormFieldsResponse, HealthResponse, ErrorResponse};
