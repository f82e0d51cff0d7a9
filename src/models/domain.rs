use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A restaurant document from the hosted directory.
///
/// Restaurants are static reference data for the discovery engine; their
/// create/update lifecycle lives entirely in the hosted backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "restaurantId", alias = "id")]
    pub restaurant_id: String,
    pub name: String,
    pub cuisine: String,
    #[serde(default)]
    pub dietary: Vec<String>,
    pub district: String,
    pub rating: f64,
    #[serde(rename = "priceLevel", default = "default_price_level")]
    pub price_level: u8,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(rename = "personaScores", default)]
    pub persona_scores: HashMap<String, u8>,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(rename = "imageFileIds", default)]
    pub image_file_ids: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Restaurant {
    /// Affinity score for a persona, 0 when the restaurant has no entry for it.
    pub fn persona_score(&self, persona: &str) -> u8 {
        self.persona_scores.get(persona).copied().unwrap_or(0)
    }
}

fn default_price_level() -> u8 { 3 }

fn default_currency() -> String { "EUR".to_string() }

/// Discovery filter criteria. All four axes are independent and optional;
/// `None` means no constraint on that axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub persona: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub dietary: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
}

/// A resolved address returned by the geocoding collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "formattedAddress")]
    pub formatted_address: String,
}
