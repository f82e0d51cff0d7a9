use serde::{Deserialize, Serialize};
use crate::models::domain::FilterCriteria;
use crate::validation::{AddressState, NameState};

/// One ranked restaurant in a discovery response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRestaurant {
    #[serde(rename = "restaurantId")]
    pub restaurant_id: String,
    pub name: String,
    pub cuisine: String,
    pub dietary: Vec<String>,
    pub district: String,
    pub rating: f64,
    #[serde(rename = "priceLevel")]
    pub price_level: u8,
    #[serde(rename = "priceSign")]
    pub price_sign: String,
    /// Present only when the request named a persona.
    #[serde(rename = "personaScore", default, skip_serializing_if = "Option::is_none")]
    pub persona_score: Option<u8>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "imageFileIds")]
    pub image_file_ids: Vec<String>,
    pub description: Option<String>,
}

/// Response for the discover endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverResponse {
    pub restaurants: Vec<RankedRestaurant>,
    pub total_candidates: usize,
}

/// Response for the geocode endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "formattedAddress")]
    pub formatted_address: String,
    #[serde(rename = "nearestDistrict")]
    pub nearest_district: Option<String>,
}

/// Response for the name-availability endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameCheckResponse {
    pub name: String,
    pub available: bool,
}

/// Response after opening a form session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreatedResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Snapshot of a form session's fields and search selection
#[derive(Debug, Clone, Serialize)]
pub struct FormStateResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub address: AddressState,
    #[serde(rename = "addressText")]
    pub address_text: String,
    pub name: NameState,
    #[serde(rename = "nameText")]
    pub name_text: String,
    pub selection: FilterCriteria,
}

/// One field descriptor in the restaurant form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(rename = "adminOnly")]
    pub admin_only: bool,
}

/// Response for the capability-gated form-fields endpoint
#[derive(Debug, Clone, Serialize)]
pub struct FormFieldsResponse {
    pub capability: crate::services::Capability,
    pub fields: Vec<FormField>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
