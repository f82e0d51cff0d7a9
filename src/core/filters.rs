use crate::models::{Restaurant, FilterCriteria};

/// Dietary filter value meaning "no dietary constraint".
pub const DIETARY_NONE: &str = "none";

/// Check whether a restaurant passes every specified filter axis.
///
/// Axes are independent; an unset axis never excludes anything, and the
/// persona axis never filters at all (it only drives ranking).
#[inline]
pub fn matches_criteria(restaurant: &Restaurant, criteria: &FilterCriteria) -> bool {
    // Cuisine: exact match
    if let Some(cuisine) = &criteria.cuisine {
        if restaurant.cuisine != *cuisine {
            return false;
        }
    }

    // Dietary: set membership, with "none" acting as no constraint
    if let Some(dietary) = &criteria.dietary {
        if dietary != DIETARY_NONE && !restaurant.dietary.iter().any(|d| d == dietary) {
            return false;
        }
    }

    // District: exact match
    if let Some(district) = &criteria.district {
        if restaurant.district != *district {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn create_restaurant(cuisine: &str, dietary: &[&str], district: &str) -> Restaurant {
        Restaurant {
            restaurant_id: "test".to_string(),
            name: "Test Restaurant".to_string(),
            cuisine: cuisine.to_string(),
            dietary: dietary.iter().map(|d| d.to_string()).collect(),
            district: district.to_string(),
            rating: 4.0,
            price_level: 2,
            currency: "EUR".to_string(),
            persona_scores: HashMap::new(),
            latitude: 52.3676,
            longitude: 4.9041,
            image_file_ids: vec![],
            description: None,
        }
    }

    #[test]
    fn test_no_criteria_matches_everything() {
        let restaurant = create_restaurant("turkish", &[], "west");
        assert!(matches_criteria(&restaurant, &FilterCriteria::default()));
    }

    #[test]
    fn test_cuisine_mismatch() {
        let restaurant = create_restaurant("turkish", &[], "west");
        let criteria = FilterCriteria {
            cuisine: Some("japanese".to_string()),
            ..Default::default()
        };
        assert!(!matches_criteria(&restaurant, &criteria));
    }

    #[test]
    fn test_dietary_membership() {
        let restaurant = create_restaurant("turkish", &["halal", "vegetarian"], "west");
        let criteria = FilterCriteria {
            dietary: Some("halal".to_string()),
            ..Default::default()
        };
        assert!(matches_criteria(&restaurant, &criteria));

        let criteria = FilterCriteria {
            dietary: Some("vegan".to_string()),
            ..Default::default()
        };
        assert!(!matches_criteria(&restaurant, &criteria));
    }

    #[test]
    fn test_dietary_none_sentinel_is_no_constraint() {
        let restaurant = create_restaurant("turkish", &[], "west");
        let criteria = FilterCriteria {
            dietary: Some(DIETARY_NONE.to_string()),
            ..Default::default()
        };
        assert!(matches_criteria(&restaurant, &criteria));
    }

    #[test]
    fn test_all_axes_combine_with_and() {
        let restaurant = create_restaurant("turkish", &["halal"], "west");
        let criteria = FilterCriteria {
            cuisine: Some("turkish".to_string()),
            dietary: Some("halal".to_string()),
            district: Some("oost".to_string()), // wrong district
            ..Default::default()
        };
        assert!(!matches_criteria(&restaurant, &criteria));
    }

    #[test]
    fn test_persona_never_filters() {
        let restaurant = create_restaurant("turkish", &[], "west");
        let criteria = FilterCriteria {
            persona: Some("foodie".to_string()),
            ..Default::default()
        };
        assert!(matches_criteria(&restaurant, &criteria));
    }
}
