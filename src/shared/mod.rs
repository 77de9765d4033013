pub mod fuzzy;
pub mod geo;

pub use geo::*;

use rayon::prelude::*;
use std::cmp::Ordering;

/// Minimum similarity for an entity to show up in search results.
const SEARCH_THRESHOLD: f64 = 0.1;

pub trait Identifiable {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn normalized_name(&self) -> &str;
}

/// Generic fuzzy search built for multithreaded searching.
///
/// Results are ordered by descending similarity, equal scores fall back to
/// the entity id so the ordering never depends on thread scheduling.
pub fn search<'a, T>(needle: &str, haystack: &'a [T]) -> Vec<&'a T>
where
    T: Send + Sync + Identifiable,
{
    let normalized_needle = fuzzy::normalize(needle);
    let mut results: Vec<(&T, f64)> = haystack
        .par_iter()
        .filter_map(|hay| {
            let score = fuzzy::score(&normalized_needle, hay.normalized_name());
            (score > SEARCH_THRESHOLD).then_some((hay, score))
        })
        .collect();

    results.par_sort_unstable_by(|(a, a_score), (b, b_score)| {
        b_score
            .partial_cmp(a_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id().cmp(b.id()))
    });
    results.into_iter().map(|(entity, _)| entity).collect()
}
