//! # Filter/Sort Engine
//!
//! Narrows and orders a collection of [`City`] records against a
//! [`FilterParams`]. The input slice is never mutated; every call returns a
//! fresh vector.
//!
//! ## Pipeline
//!
//! Stages run in a fixed order, each consuming the previous stage's output:
//!
//! | # | Stage | Skipped when |
//! |---|-------|--------------|
//! | 1 | Search (name, province, description) | search is blank |
//! | 2 | Region | no regions selected |
//! | 3 | Cost range (inclusive) | never |
//! | 4 | Speed floor | `min_speed == 0` |
//! | 5 | Favorites gate | `show_favorites` off, or no favorites stored |
//! | 6 | Bookmarks gate | `show_bookmarks` off, or no bookmarks stored |
//! | 7 | Sort | never |
//!
//! Stages 1-6 only ever remove cities, so adding a constraint can never grow
//! the result. Within the region stage, selecting more regions widens the
//! match (a city passes if its province belongs to any selected region).
//!
//! ## Minimum Cost
//!
//! `cost_per_month` is free text like `"2.1~3M"`. [`extract_min_cost`] takes
//! the first numeral anywhere in the string; a string without one counts as
//! `0`. The same value feeds the cost-range stage and the `cheap` sort.
//!
//! ## Determinism
//!
//! For the same cities, parameters and stored favorites/bookmarks, the result
//! is identical. Sorting is stable and has no secondary key: ties keep the
//! order they had after filtering.

mod params;
mod region;
mod sort;

pub use params::{CostRange, FilterParams, SortKey, DEFAULT_COST_MAX, DEFAULT_COST_MIN};
pub use region::{provinces_for, region, Region, REGIONS};

use crate::model::City;
use crate::store::{IdSetStore, KvBackend};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static FIRST_NUMERAL: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(\d+\.?\d*)").ok());

/// Run the full pipeline.
///
/// The favorites and bookmarks gates read their id lists from `backend`.
pub fn apply_filters<B>(cities: &[City], filters: &FilterParams, backend: &B) -> Vec<City>
where
    B: KvBackend + ?Sized,
{
    let mut result = filter_by_search(cities, &filters.search);
    result = filter_by_regions(&result, &filters.regions);
    result = filter_by_cost_range(&result, &filters.cost_range);
    result = filter_by_speed(&result, filters.min_speed);

    if filters.show_favorites {
        let favorites = IdSetStore::favorites(backend).list();
        result = filter_by_ids(&result, &favorites);
    }
    if filters.show_bookmarks {
        let bookmarks = IdSetStore::bookmarks(backend).list();
        result = filter_by_ids(&result, &bookmarks);
    }

    sort_cities(&mut result, filters.sort_by);

    debug!(
        total = cities.len(),
        matched = result.len(),
        sort = %filters.sort_by,
        "filtered cities"
    );
    result
}

/// Case-insensitive substring match against name, province and description.
///
/// A blank `search` passes everything through. Otherwise the search string is
/// lower-cased as given, surrounding whitespace included.
pub fn filter_by_search(cities: &[City], search: &str) -> Vec<City> {
    if search.trim().is_empty() {
        return cities.to_vec();
    }
    let needle = search.to_lowercase();

    cities
        .iter()
        .filter(|city| {
            city.name.to_lowercase().contains(&needle)
                || city.province.to_lowercase().contains(&needle)
                || city
                    .description
                    .as_deref()
                    .is_some_and(|description| description.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Keep cities whose province belongs to any of the given region keys.
/// An empty key list passes everything through; unknown keys match nothing.
pub fn filter_by_regions<K: AsRef<str>>(cities: &[City], regions: &[K]) -> Vec<City> {
    if regions.is_empty() {
        return cities.to_vec();
    }

    cities
        .iter()
        .filter(|city| {
            regions
                .iter()
                .any(|key| provinces_for(key.as_ref()).contains(&city.province.as_str()))
        })
        .cloned()
        .collect()
}

/// Keep cities whose minimum cost lies within `range`, bounds inclusive.
/// An inverted range keeps nothing.
pub fn filter_by_cost_range(cities: &[City], range: &CostRange) -> Vec<City> {
    cities
        .iter()
        .filter(|city| range.contains(city.min_cost()))
        .cloned()
        .collect()
}

/// Keep cities at least as fast as `min_speed`. Zero disables the floor.
pub fn filter_by_speed(cities: &[City], min_speed: u32) -> Vec<City> {
    if min_speed == 0 {
        return cities.to_vec();
    }
    cities
        .iter()
        .filter(|city| city.internet_speed >= min_speed)
        .cloned()
        .collect()
}

/// Keep cities whose id is in `ids`.
///
/// An empty `ids` list passes everything through.
pub fn filter_by_ids<K: AsRef<str>>(cities: &[City], ids: &[K]) -> Vec<City> {
    if ids.is_empty() {
        return cities.to_vec();
    }
    cities
        .iter()
        .filter(|city| ids.iter().any(|id| id.as_ref() == city.id))
        .cloned()
        .collect()
}

/// Stable in-place sort by `key`.
pub fn sort_cities(cities: &mut [City], key: SortKey) {
    sort::sort_in_place(cities, key);
}

/// First numeral in a free-text cost string, or `0.0` if there is none.
///
/// ```
/// use nomadapp::filters::extract_min_cost;
///
/// assert_eq!(extract_min_cost("2.1~3M"), 2.1);
/// assert_eq!(extract_min_cost("about 1.5M"), 1.5);
/// assert_eq!(extract_min_cost("ask locals"), 0.0);
/// ```
pub fn extract_min_cost(cost: &str) -> f64 {
    FIRST_NUMERAL
        .as_ref()
        .and_then(|re| re.captures(cost))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::{mock_cities, names};

    #[test]
    fn test_extract_min_cost() {
        assert_eq!(extract_min_cost("2.5~3.5M"), 2.5);
        assert_eq!(extract_min_cost("3M"), 3.0);
        assert_eq!(extract_min_cost("월 2~3백만원"), 2.0);
        assert_eq!(extract_min_cost("1.~2M"), 1.0);
        assert_eq!(extract_min_cost(""), 0.0);
        assert_eq!(extract_min_cost("~M"), 0.0);
    }

    #[test]
    fn test_default_filter_keeps_everything_sorted_by_overall() {
        let backend = MemBackend::new();
        let result = apply_filters(&mock_cities(), &FilterParams::default(), &backend);
        assert_eq!(names(&result), vec!["서울", "부산", "강릉", "전주", "대구"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let backend = MemBackend::new();
        let cities = mock_cities();
        let params = FilterParams {
            sort_by: SortKey::Cheap,
            ..Default::default()
        };
        apply_filters(&cities, &params, &backend);
        assert_eq!(cities, mock_cities());
    }

    #[test]
    fn test_search_by_name() {
        let params = FilterParams {
            search: "서울".into(),
            ..Default::default()
        };
        let result = apply_filters(&mock_cities(), &params, &MemBackend::new());
        assert_eq!(names(&result), vec!["서울"]);
    }

    #[test]
    fn test_search_by_province_and_description() {
        assert_eq!(names(&filter_by_search(&mock_cities(), "강원")), vec!["강릉"]);
        assert_eq!(names(&filter_by_search(&mock_cities(), "항구")), vec!["부산"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut cities = mock_cities();
        cities[0].name = "Seoul".into();
        assert_eq!(names(&filter_by_search(&cities, "SEOUL")), vec!["Seoul"]);
    }

    #[test]
    fn test_blank_search_passes_through() {
        assert_eq!(filter_by_search(&mock_cities(), "   ").len(), 5);
        assert_eq!(filter_by_search(&mock_cities(), "").len(), 5);
    }

    #[test]
    fn test_search_is_not_trimmed() {
        assert!(filter_by_search(&mock_cities(), " 서울").is_empty());
    }

    #[test]
    fn test_search_no_match() {
        assert!(filter_by_search(&mock_cities(), "도쿄").is_empty());
    }

    #[test]
    fn test_region_single() {
        let result = filter_by_regions(&mock_cities(), &["gyeongsan"]);
        assert_eq!(names(&result), vec!["부산", "대구"]);
    }

    #[test]
    fn test_region_is_union() {
        let result = filter_by_regions(&mock_cities(), &["seoul", "gangwon"]);
        assert_eq!(names(&result), vec!["서울", "강릉"]);
    }

    #[test]
    fn test_region_unknown_key_matches_nothing() {
        assert!(filter_by_regions(&mock_cities(), &["atlantis"]).is_empty());
        let mixed = filter_by_regions(&mock_cities(), &["atlantis", "jeonlla"]);
        assert_eq!(names(&mixed), vec!["전주"]);
    }

    #[test]
    fn test_region_empty_passes_through() {
        let none: [&str; 0] = [];
        assert_eq!(filter_by_regions(&mock_cities(), &none).len(), 5);
    }

    #[test]
    fn test_cost_range_inclusive_bounds() {
        let result = filter_by_cost_range(&mock_cities(), &CostRange::new(1.8, 2.2));
        assert_eq!(names(&result), vec!["강릉", "전주", "부산", "대구"]);
    }

    #[test]
    fn test_cost_without_numeral_counts_as_zero() {
        let mut cities = mock_cities();
        for city in cities.iter_mut().filter(|city| city.id == "daegu") {
            city.cost_per_month = "문의".into();
        }

        let kept = filter_by_cost_range(&cities, &CostRange::new(0.0, 5.0));
        assert!(names(&kept).contains(&"대구"));
        assert_eq!(kept.len(), cities.len());

        let dropped = filter_by_cost_range(&cities, &CostRange::default());
        assert!(!names(&dropped).contains(&"대구"));
        assert_eq!(dropped.len(), cities.len() - 1);

        sort_cities(&mut cities, SortKey::Cheap);
        assert_eq!(names(&cities)[0], "대구");
    }

    #[test]
    fn test_cost_range_inverted_is_empty() {
        let params = FilterParams {
            cost_range: CostRange::new(5.0, 1.0),
            ..Default::default()
        };
        assert!(apply_filters(&mock_cities(), &params, &MemBackend::new()).is_empty());
    }

    #[test]
    fn test_speed_floor() {
        assert_eq!(filter_by_speed(&mock_cities(), 0).len(), 5);
        let result = filter_by_speed(&mock_cities(), 900);
        assert_eq!(names(&result), vec!["서울", "부산"]);
        assert!(filter_by_speed(&mock_cities(), 10_000).is_empty());
    }

    #[test]
    fn test_favorites_gate() {
        let backend = MemBackend::new();
        let favorites = IdSetStore::favorites(&backend);
        favorites.add("busan");
        favorites.add("jeonju");

        let params = FilterParams {
            show_favorites: true,
            ..Default::default()
        };
        let result = apply_filters(&mock_cities(), &params, &backend);
        assert_eq!(names(&result), vec!["부산", "전주"]);
    }

    #[test]
    fn test_gates_combine() {
        let backend = MemBackend::new();
        IdSetStore::favorites(&backend).add("busan");
        IdSetStore::favorites(&backend).add("seoul");
        IdSetStore::bookmarks(&backend).add("seoul");

        let params = FilterParams {
            show_favorites: true,
            show_bookmarks: true,
            ..Default::default()
        };
        let result = apply_filters(&mock_cities(), &params, &backend);
        assert_eq!(names(&result), vec!["서울"]);
    }

    #[test]
    fn test_gate_with_empty_store_passes_through() {
        let params = FilterParams {
            show_bookmarks: true,
            ..Default::default()
        };
        let result = apply_filters(&mock_cities(), &params, &MemBackend::new());
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_gate_off_ignores_store() {
        let backend = MemBackend::new();
        IdSetStore::favorites(&backend).add("busan");
        let result = apply_filters(&mock_cities(), &FilterParams::default(), &backend);
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_sort_orders() {
        let mut cities = mock_cities();

        sort_cities(&mut cities, SortKey::Cheap);
        assert_eq!(names(&cities), vec!["강릉", "전주", "대구", "부산", "서울"]);

        sort_cities(&mut cities, SortKey::Fast);
        assert_eq!(names(&cities), vec!["서울", "부산", "강릉", "전주", "대구"]);

        sort_cities(&mut cities, SortKey::Active);
        assert_eq!(names(&cities), vec!["서울", "부산", "강릉", "전주", "대구"]);

        sort_cities(&mut cities, SortKey::Quality);
        assert_eq!(names(&cities), vec!["서울", "부산", "강릉", "전주", "대구"]);

        sort_cities(&mut cities, SortKey::Reviews);
        assert_eq!(names(&cities), vec!["서울", "부산", "강릉", "전주", "대구"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut cities = mock_cities();
        for city in cities.iter_mut() {
            city.overall_score = 7.0;
        }
        let before: Vec<String> = names(&cities).into_iter().map(String::from).collect();
        sort_cities(&mut cities, SortKey::Overall);
        assert_eq!(names(&cities), before);
    }

    #[test]
    fn test_sort_is_idempotent() {
        for key in SortKey::ALL {
            let mut once = mock_cities();
            sort_cities(&mut once, key);
            let mut twice = once.clone();
            sort_cities(&mut twice, key);
            assert_eq!(once, twice, "sort by {} not idempotent", key);
        }
    }

    #[test]
    fn test_stages_only_narrow() {
        let backend = MemBackend::new();
        IdSetStore::favorites(&backend).add("seoul");
        IdSetStore::favorites(&backend).add("busan");

        let base = FilterParams::default();
        let base_len = apply_filters(&mock_cities(), &base, &backend).len();

        let tightened = [
            FilterParams {
                search: "도시".into(),
                ..base.clone()
            },
            FilterParams {
                regions: vec!["gyeongsan".into()],
                ..base.clone()
            },
            FilterParams {
                cost_range: CostRange::new(2.0, 5.0),
                ..base.clone()
            },
            FilterParams {
                min_speed: 850,
                ..base.clone()
            },
            FilterParams {
                show_favorites: true,
                ..base.clone()
            },
        ];

        for params in tightened {
            assert!(apply_filters(&mock_cities(), &params, &backend).len() <= base_len);
        }
    }

    #[test]
    fn test_combined_filters() {
        let params = FilterParams {
            regions: vec!["gyeongsan".into(), "seoul".into()],
            cost_range: CostRange::new(2.0, 3.0),
            min_speed: 900,
            sort_by: SortKey::Cheap,
            ..Default::default()
        };
        let result = apply_filters(&mock_cities(), &params, &MemBackend::new());
        assert_eq!(names(&result), vec!["부산", "서울"]);
    }
}
