use super::params::SortKey;
use crate::model::City;
use std::cmp::Ordering;

/// Sort in place by `key`. Stable: cities comparing equal keep their
/// relative input order.
pub fn sort_in_place(cities: &mut [City], key: SortKey) {
    match key {
        SortKey::Overall => cities.sort_by(|a, b| descending(a.overall_score, b.overall_score)),
        SortKey::Cheap => cities.sort_by(|a, b| ascending(a.min_cost(), b.min_cost())),
        SortKey::Fast => cities.sort_by(|a, b| b.internet_speed.cmp(&a.internet_speed)),
        SortKey::Active => cities.sort_by(|a, b| b.nomads_count.cmp(&a.nomads_count)),
        SortKey::Quality => cities.sort_by(|a, b| descending(a.quality_score, b.quality_score)),
        SortKey::Reviews => cities.sort_by(|a, b| b.reviews_count.cmp(&a.reviews_count)),
    }
}

// NaN compares equal to everything so a bad score never panics the sort.
fn ascending(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn descending(a: f64, b: f64) -> Ordering {
    ascending(b, a)
}
