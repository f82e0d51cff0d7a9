use crate::models::{Restaurant, FilterCriteria};
use crate::core::filters::matches_criteria;
use std::cmp::Ordering;

/// Filter and rank restaurants for a discovery request.
///
/// Filtering applies every specified axis (logical AND). Ranking covers the
/// entire surviving set, never a partial top-k:
/// - with a persona: descending persona affinity, ties broken by descending
///   rating;
/// - without: descending rating alone.
///
/// `Vec::sort_by` is stable, so restaurants with equal sort keys keep their
/// input order. The input slice is never mutated.
pub fn filter_and_rank(restaurants: &[Restaurant], criteria: &FilterCriteria) -> Vec<Restaurant> {
    let mut matched: Vec<Restaurant> = restaurants
        .iter()
        .filter(|r| matches_criteria(r, criteria))
        .cloned()
        .collect();

    match &criteria.persona {
        Some(persona) => {
            matched.sort_by(|a, b| {
                b.persona_score(persona)
                    .cmp(&a.persona_score(persona))
                    .then_with(|| {
                        b.rating
                            .partial_cmp(&a.rating)
                            .unwrap_or(Ordering::Equal)
                    })
            });
        }
        None => {
            matched.sort_by(|a, b| {
                b.rating
                    .partial_cmp(&a.rating)
                    .unwrap_or(Ordering::Equal)
            });
        }
    }

    matched
}
