use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{filter_and_rank, nearest_district, pricing::price_sign};
use crate::models::{
    DiscoverRequest, DiscoverResponse, ErrorResponse, FilterCriteria, GeocodeQuery,
    GeocodeResponse, HealthResponse, NameCheckQuery, NameCheckResponse, RankedRestaurant,
    Restaurant,
};
use crate::services::{Geocode, NameLookup};
use crate::routes::AppState;

/// Configure discovery-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/discover", web::post().to(discover))
        .route("/geocode", web::get().to(geocode))
        .route("/names/check", web::get().to(check_name));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let directory_healthy = state.directory.health_check().await.unwrap_or(false);

    let status = if directory_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Discovery endpoint
///
/// POST /api/v1/discover
///
/// Request body:
/// ```json
/// {
///   "persona": "foodie",
///   "cuisine": "turkish",
///   "dietary": "halal",
///   "district": "west",
///   "limit": 20
/// }
/// ```
async fn discover(
    state: web::Data<AppState>,
    req: web::Json<DiscoverRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for discover request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let restaurants = match state.directory.list_restaurants().await {
        Ok(restaurants) => restaurants,
        Err(e) => {
            tracing::error!("Failed to list restaurants: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list restaurants".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let total_candidates = restaurants.len();

    let criteria = FilterCriteria {
        persona: req.persona.clone(),
        cuisine: req.cuisine.clone(),
        dietary: req.dietary.clone(),
        district: req.district.clone(),
    };

    let mut ranked = filter_and_rank(&restaurants, &criteria);

    // The limit trims the response only after the full ranking pass
    if let Some(limit) = req.limit {
        ranked.truncate(limit as usize);
    }

    let restaurants: Vec<RankedRestaurant> = ranked
        .into_iter()
        .map(|r| to_ranked(r, criteria.persona.as_deref()))
        .collect();

    tracing::info!(
        "Returning {} restaurants (from {} candidates)",
        restaurants.len(),
        total_candidates
    );

    HttpResponse::Ok().json(DiscoverResponse {
        restaurants,
        total_candidates,
    })
}

fn to_ranked(restaurant: Restaurant, persona: Option<&str>) -> RankedRestaurant {
    let persona_score = persona.map(|p| restaurant.persona_score(p));
    let price_sign = price_sign(restaurant.price_level, &restaurant.currency);

    RankedRestaurant {
        restaurant_id: restaurant.restaurant_id,
        name: restaurant.name,
        cuisine: restaurant.cuisine,
        dietary: restaurant.dietary,
        district: restaurant.district,
        rating: restaurant.rating,
        price_level: restaurant.price_level,
        price_sign,
        persona_score,
        latitude: restaurant.latitude,
        longitude: restaurant.longitude,
        image_file_ids: restaurant.image_file_ids,
        description: restaurant.description,
    }
}

/// Address resolution endpoint
///
/// GET /api/v1/geocode?query=Dam+Square
///
/// Resolves free text to coordinates and annotates the result with the
/// nearest district for the edit form's district preselection.
async fn geocode(
    state: web::Data<AppState>,
    query: web::Query<GeocodeQuery>,
) -> impl Responder {
    if query.query.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Missing query".to_string(),
            message: "query parameter must not be empty".to_string(),
            status_code: 400,
        });
    }

    match state.geocoder.resolve(&query.query).await {
        Ok(Some(resolved)) => {
            let nearest_district = nearest_district(resolved.latitude, resolved.longitude)
                .map(|d| d.name.to_string());

            HttpResponse::Ok().json(GeocodeResponse {
                latitude: resolved.latitude,
                longitude: resolved.longitude,
                formatted_address: resolved.formatted_address,
                nearest_district,
            })
        }
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message: "Could not find coordinates for this address".to_string(),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Geocoding failed for {:?}: {}", query.query, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Geocoding failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Name availability endpoint
///
/// GET /api/v1/names/check?name=K%C3%B6%C5%9Fk%20Kebab&excludeId=r3
async fn check_name(
    state: web::Data<AppState>,
    query: web::Query<NameCheckQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state
        .directory
        .name_exists(&query.name, query.exclude_id.as_deref())
        .await
    {
        Ok(exists) => HttpResponse::Ok().json(NameCheckResponse {
            name: query.name.clone(),
            available: !exists,
        }),
        Err(e) => {
            tracing::error!("Name check failed for {:?}: {}", query.name, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Name check failed".to_string(),
                message: "Could not verify name availability".to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_to_ranked_includes_persona_score_only_when_asked() {
        let restaurant = Restaurant {
            restaurant_id: "r1".to_string(),
            name: "SORA".to_string(),
            cuisine: "japanese".to_string(),
            dietary: vec![],
            district: "centrum".to_string(),
            rating: 4.6,
            price_level: 2,
            currency: "EUR".to_string(),
            persona_scores: HashMap::from([("foodie".to_string(), 5)]),
            latitude: 52.37,
            longitude: 4.89,
            image_file_ids: vec![],
            description: None,
        };

        let with_persona = to_ranked(restaurant.clone(), Some("foodie"));
        assert_eq!(with_persona.persona_score, Some(5));
        assert_eq!(with_persona.price_sign, "€€");

        let without_persona = to_ranked(restaurant, None);
        assert_eq!(without_persona.persona_score, None);
    }
}
