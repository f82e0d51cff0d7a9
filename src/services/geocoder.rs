use crate::models::ResolvedAddress;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the geocoding endpoint
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// The geocoding collaborator seam.
///
/// `Ok(None)` means the collaborator answered but produced no usable
/// coordinates; that is a normal outcome, not an error.
pub trait Geocode: Send + Sync {
    fn resolve(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<ResolvedAddress>, GeocodeError>> + Send;
}

/// HTTP client for the geocoding endpoint
///
/// The endpoint takes a free-text query and answers with a `results` array;
/// each candidate carries `geometry.lat` / `geometry.lng` (number or numeric
/// string) and a `formatted` address string.
pub struct GeocoderClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl GeocoderClient {
    /// Create a new geocoder client
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }
}

impl Geocode for GeocoderClient {
    async fn resolve(&self, query: &str) -> Result<Option<ResolvedAddress>, GeocodeError> {
        let url = format!(
            "{}/geocode/v1/json?q={}&key={}&limit=1&no_annotations=1",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query),
            self.api_key
        );

        tracing::debug!("Resolving address: {}", query);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "Geocoding request failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let results = json
            .get("results")
            .and_then(|r| r.as_array())
            .ok_or_else(|| GeocodeError::InvalidResponse("Missing results array".into()))?;

        // First candidate with usable geometry wins; none at all is a
        // not-found outcome, not an error.
        let resolved = results.iter().find_map(|candidate| {
            let geometry = candidate.get("geometry")?;
            let latitude = coord_value(geometry.get("lat")?)?;
            let longitude = coord_value(geometry.get("lng")?)?;
            let formatted_address = candidate
                .get("formatted")
                .and_then(|f| f.as_str())
                .unwrap_or(query)
                .to_string();

            Some(ResolvedAddress {
                latitude,
                longitude,
                formatted_address,
            })
        });

        if resolved.is_none() {
            tracing::debug!("No usable geometry for query: {}", query);
        }

        Ok(resolved)
    }
}

/// Coordinates arrive as JSON numbers or as numeric strings.
fn coord_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
