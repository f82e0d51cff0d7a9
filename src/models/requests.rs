use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to discover restaurants
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiscoverRequest {
    #[serde(default)]
    pub persona: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub dietary: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    /// Applied after the full ranking pass, never during it.
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to open a form session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// When editing an existing restaurant, its id is excluded from the
    /// name-availability lookup.
    #[serde(alias = "editing_restaurant_id", rename = "editingRestaurantId", default)]
    pub editing_restaurant_id: Option<String>,
}

/// A keystroke update for a debounced form field
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FieldInputRequest {
    #[validate(length(max = 500))]
    pub text: String,
}

/// Query for the geocode endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeQuery {
    pub query: String,
}

/// Query for the name-availability endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NameCheckQuery {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(alias = "exclude_id", rename = "excludeId", default)]
    pub exclude_id: Option<String>,
}
