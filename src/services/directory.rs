use crate::core::pricing::classify_price;
use crate::models::Restaurant;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the hosted restaurant directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Name-existence lookup seam, scoped so edit mode can exclude the record
/// being edited.
pub trait NameLookup: Send + Sync {
    fn name_exists(
        &self,
        name: &str,
        exclude_id: Option<&str>,
    ) -> impl Future<Output = Result<bool, DirectoryError>> + Send;
}

/// REST client for the hosted restaurant directory
///
/// The directory is the app's system of record; this client only reads from
/// it: the full restaurant list for discovery and the name-existence lookup
/// for the edit form.
pub struct DirectoryClient {
    base_url: String,
    api_key: String,
    table: String,
    client: Client,
}

impl DirectoryClient {
    /// Create a new directory client
    pub fn new(base_url: String, api_key: String, table: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            table,
            client,
        }
    }

    /// Fetch the full restaurant list.
    ///
    /// The engine ranks over the entire set, so no pagination is applied.
    /// Documents that fail to parse are skipped rather than failing the call.
    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, DirectoryError> {
        let url = format!(
            "{}/rest/v1/{}?select=*",
            self.base_url.trim_end_matches('/'),
            self.table
        );

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to list restaurants: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .as_array()
            .ok_or_else(|| DirectoryError::InvalidResponse("Expected a JSON array".into()))?;

        let restaurants: Vec<Restaurant> = documents
            .iter()
            .filter_map(parse_restaurant)
            .collect();

        tracing::debug!(
            "Listed {} restaurants ({} documents)",
            restaurants.len(),
            documents.len()
        );

        Ok(restaurants)
    }

    /// Health check against the directory's REST root
    pub async fn health_check(&self) -> Result<bool, DirectoryError> {
        let url = format!("{}/rest/v1/", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

impl NameLookup for DirectoryClient {
    async fn name_exists(
        &self,
        name: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, DirectoryError> {
        // ilike without wildcards: case-insensitive equality
        let mut url = format!(
            "{}/rest/v1/{}?select=restaurantId&name=ilike.{}",
            self.base_url.trim_end_matches('/'),
            self.table,
            urlencoding::encode(name)
        );

        if let Some(id) = exclude_id {
            url.push_str(&format!("&restaurantId=neq.{}", urlencoding::encode(id)));
        }

        tracing::debug!("Checking name availability: {}", name);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to check name: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .as_array()
            .ok_or_else(|| DirectoryError::InvalidResponse("Expected a JSON array".into()))?;

        Ok(!documents.is_empty())
    }
}

/// Parse one directory document into a Restaurant.
///
/// Documents written before price levels were introduced carry only an
/// average main-course price; classify those on the way in.
fn parse_restaurant(doc: &Value) -> Option<Restaurant> {
    let mut doc = doc.clone();

    if doc.get("priceLevel").is_none() {
        if let Some(avg) = doc.get("avgMainPrice").and_then(|v| v.as_f64()) {
            let currency = doc
                .get("currency")
                .and_then(|v| v.as_str())
                .unwrap_or("EUR")
                .to_string();
            let level = classify_price(avg, &currency);
            doc.as_object_mut()?
                .insert("priceLevel".to_string(), level.into());
        }
    }

    serde_json::from_value(doc).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_client_creation() {
        let client = DirectoryClient::new(
            "https://directory.test".to_string(),
            "test_key".to_string(),
            "restaurants".to_string(),
        );

        assert_eq!(client.base_url, "https://directory.test");
        assert_eq!(client.table, "restaurants");
    }

    #[test]
    fn test_parse_restaurant_with_price_level() {
        let doc = serde_json::json!({
            "restaurantId": "r1",
            "name": "Köşk Kebab",
            "cuisine": "turkish",
            "district": "oost",
            "rating": 4.1,
            "priceLevel": 2
        });

        let restaurant = parse_restaurant(&doc).unwrap();
        assert_eq!(restaurant.price_level, 2);
    }

    #[test]
    fn test_parse_restaurant_classifies_missing_price_level() {
        let doc = serde_json::json!({
            "restaurantId": "r2",
            "name": "De Kas",
            "cuisine": "dutch",
            "district": "oost",
            "rating": 4.7,
            "avgMainPrice": 52.0,
            "currency": "EUR"
        });

        let restaurant = parse_restaurant(&doc).unwrap();
        assert_eq!(restaurant.price_level, 4);
    }

    #[test]
    fn test_parse_restaurant_skips_malformed() {
        let doc = serde_json::json!({"name": "missing everything else"});
        assert!(parse_restaurant(&doc).is_none());
    }
}
