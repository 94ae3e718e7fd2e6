//! # Review Store
//!
//! Reviews for a city come from two tiers:
//!
//! 1. **Seed**: an immutable, externally supplied collection ([`ReviewSeed`]).
//! 2. **Overlay**: a mutable per-city bucket in the key-value backend
//!    (`nomad_reviews_city_<cityId>`).
//!
//! Reads merge both tiers. Writes touch the overlay only:
//!
//! | Operation | Seed review id | Overlay review id |
//! |-----------|----------------|-------------------|
//! | `update`  | `None`         | patched review    |
//! | `remove`  | `false`        | `true`            |
//!
//! Seed reviews can never be edited or deleted through this store.
//!
//! ## Ordering
//!
//! The merged list is always returned newest first by `created_at`. Values that
//! do not parse as a date sort after every dated review. Sorting is stable, so
//! equal timestamps keep seed-then-overlay order.
//!
//! ## Local Ids
//!
//! Ids minted here look like `local_1718000000000_k3j9x0a2b`: a prefix, the
//! creation time in milliseconds and a random suffix, so they cannot collide
//! with ids coming from the seed.

use super::backend::KvBackend;
use super::{load_json, review_key, save_json};
use crate::model::{Review, ReviewDraft, ReviewPatch};
use chrono::Utc;
use std::cmp::Reverse;
use uuid::Uuid;

pub const LOCAL_ID_PREFIX: &str = "local_";

/// Read-only source of reviews that exist outside the local store.
pub trait ReviewSeed {
    fn reviews_for_city(&self, city_id: &str) -> Vec<Review>;
}

impl ReviewSeed for [Review] {
    fn reviews_for_city(&self, city_id: &str) -> Vec<Review> {
        self.iter()
            .filter(|review| review.city_id == city_id)
            .cloned()
            .collect()
    }
}

impl ReviewSeed for Vec<Review> {
    fn reviews_for_city(&self, city_id: &str) -> Vec<Review> {
        self.as_slice().reviews_for_city(city_id)
    }
}

impl<S: ReviewSeed + ?Sized> ReviewSeed for &S {
    fn reviews_for_city(&self, city_id: &str) -> Vec<Review> {
        (**self).reviews_for_city(city_id)
    }
}

/// A seed with no reviews.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSeed;

impl ReviewSeed for NoSeed {
    fn reviews_for_city(&self, _city_id: &str) -> Vec<Review> {
        Vec::new()
    }
}

pub struct ReviewStore<B: KvBackend, S: ReviewSeed> {
    backend: B,
    seed: S,
}

impl<B: KvBackend, S: ReviewSeed> ReviewStore<B, S> {
    pub fn new(backend: B, seed: S) -> Self {
        Self { backend, seed }
    }

    /// All reviews for a city, seed and overlay merged, newest first.
    pub fn list(&self, city_id: &str) -> Vec<Review> {
        let mut reviews = self.seed.reviews_for_city(city_id);
        reviews.extend(self.stored(city_id));
        reviews.sort_by_key(|review| Reverse(review.timestamp()));
        reviews
    }

    /// Append a new review to the city's overlay bucket.
    ///
    /// The returned review carries its freshly minted id. It is returned even
    /// if the write was dropped by the backend.
    pub fn add(&self, city_id: &str, draft: ReviewDraft) -> Review {
        let review = draft.into_review(new_local_id());

        let mut bucket = self.stored(city_id);
        bucket.push(review.clone());
        save_json(
            &self.backend,
            &review_key(city_id),
            &bucket,
            "Failed to save review",
        );

        review
    }

    /// Patch a review in the overlay. Seed reviews and unknown ids yield `None`.
    pub fn update(&self, city_id: &str, review_id: &str, patch: &ReviewPatch) -> Option<Review> {
        let mut bucket = self.stored(city_id);
        let review = bucket.iter_mut().find(|review| review.id == review_id)?;
        patch.apply(review);
        let updated = review.clone();

        save_json(
            &self.backend,
            &review_key(city_id),
            &bucket,
            "Failed to update review",
        );

        Some(updated)
    }

    /// Delete a review from the overlay. Returns `false` for seed reviews and
    /// unknown ids.
    pub fn remove(&self, city_id: &str, review_id: &str) -> bool {
        let bucket = self.stored(city_id);
        let before = bucket.len();
        let remaining: Vec<Review> = bucket
            .into_iter()
            .filter(|review| review.id != review_id)
            .collect();

        if remaining.len() == before {
            return false;
        }

        save_json(
            &self.backend,
            &review_key(city_id),
            &remaining,
            "Failed to delete review",
        );
        true
    }

    /// Mean rating over seed and overlay, rounded to one decimal.
    /// `0.0` means the city has no reviews.
    pub fn average_rating(&self, city_id: &str) -> f64 {
        average_rating(&self.list(city_id))
    }

    /// Merged reviews, newest first.
    pub fn by_date(&self, city_id: &str) -> Vec<Review> {
        self.list(city_id)
    }

    /// Merged reviews, highest rating first. Equal ratings stay newest first.
    pub fn by_rating(&self, city_id: &str) -> Vec<Review> {
        let mut reviews = self.list(city_id);
        reviews.sort_by_key(|review| Reverse(review.rating));
        reviews
    }

    /// Number of reviews written by `user_id` across the given cities.
    pub fn count_by_user<I, C>(&self, city_ids: I, user_id: &str) -> usize
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        city_ids
            .into_iter()
            .map(|city_id| {
                self.list(city_id.as_ref())
                    .iter()
                    .filter(|review| review.user_id == user_id)
                    .count()
            })
            .sum()
    }

    fn stored(&self, city_id: &str) -> Vec<Review> {
        load_json(&self.backend, &review_key(city_id)).unwrap_or_default()
    }
}

/// Mean of the ratings rounded to one decimal place, or `0.0` for none.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
    let mean = f64::from(sum) / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}

fn new_local_id() -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!(
        "{}{}_{}",
        LOCAL_ID_PREFIX,
        Utc::now().timestamp_millis(),
        suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use std::collections::HashSet;

    fn seed_review(id: &str, city_id: &str, rating: u8, created_at: &str) -> Review {
        Review {
            id: id.into(),
            user_id: format!("user-{}", id),
            city_id: city_id.into(),
            title: format!("Title {}", id),
            content: "Seed content".into(),
            rating,
            created_at: created_at.into(),
            username: "Seeder".into(),
        }
    }

    fn seed() -> Vec<Review> {
        vec![
            seed_review("review-1", "seoul", 5, "2024-10-20T00:00:00.000Z"),
            seed_review("review-2", "seoul", 4, "2024-10-18T00:00:00.000Z"),
            seed_review("review-3", "gangneung", 5, "2024-10-15T00:00:00.000Z"),
        ]
    }

    fn draft(city_id: &str, rating: u8, created_at: &str) -> ReviewDraft {
        ReviewDraft {
            user_id: "current_user_123".into(),
            city_id: city_id.into(),
            title: "Local title".into(),
            content: "Local content".into(),
            rating,
            created_at: created_at.into(),
            username: "Me".into(),
        }
    }

    #[test]
    fn test_list_merges_seed_and_overlay() {
        let backend = MemBackend::new();
        let seed = seed();
        let store = ReviewStore::new(&backend, &seed);
        let added = store.add("seoul", draft("seoul", 3, "2024-10-19"));

        let ids: Vec<String> = store.list("seoul").into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["review-1".to_string(), added.id, "review-2".to_string()]);
    }

    #[test]
    fn test_list_unknown_city_is_empty() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, seed());
        assert!(store.list("nowhere").is_empty());
    }

    #[test]
    fn test_list_has_no_duplicate_ids() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, seed());
        store.add("seoul", draft("seoul", 3, "2024-10-21"));
        store.add("seoul", draft("seoul", 4, "2024-10-21"));

        let reviews = store.list("seoul");
        let ids: HashSet<&str> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), reviews.len());
    }

    #[test]
    fn test_undated_reviews_sort_last() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, seed());
        store.add("seoul", draft("seoul", 3, "someday"));

        let reviews = store.list("seoul");
        assert_eq!(reviews.last().unwrap().created_at, "someday");
    }

    #[test]
    fn test_add_mints_local_ids() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, NoSeed);
        let a = store.add("seoul", draft("seoul", 4, "2024-10-21"));
        let b = store.add("seoul", draft("seoul", 4, "2024-10-21"));

        assert!(a.id.starts_with(LOCAL_ID_PREFIX));
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.split('_').count(), 3);
    }

    #[test]
    fn test_add_never_writes_seed() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, seed());
        store.add("seoul", draft("seoul", 2, "2024-10-21"));

        let stored: Vec<Review> =
            serde_json::from_str(&backend.raw(&review_key("seoul")).unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].id.starts_with(LOCAL_ID_PREFIX));
    }

    #[test]
    fn test_add_returns_review_when_write_fails() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let store = ReviewStore::new(&backend, NoSeed);

        let review = store.add("seoul", draft("seoul", 4, "2024-10-21"));
        assert_eq!(review.rating, 4);
        assert!(store.list("seoul").is_empty());
    }

    #[test]
    fn test_update_local_review() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, NoSeed);
        let added = store.add("seoul", draft("seoul", 4, "2024-10-21"));

        let patch = ReviewPatch {
            title: Some("Edited".into()),
            rating: Some(2),
            ..Default::default()
        };
        let updated = store.update("seoul", &added.id, &patch).unwrap();

        assert_eq!(updated.title, "Edited");
        assert_eq!(updated.rating, 2);
        assert_eq!(updated.content, "Local content");
        assert_eq!(updated.created_at, added.created_at);
        assert_eq!(store.list("seoul")[0], updated);
    }

    #[test]
    fn test_update_seed_review_is_not_found() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, seed());
        let patch = ReviewPatch {
            title: Some("x".into()),
            ..Default::default()
        };

        assert!(store.update("seoul", "review-1", &patch).is_none());
        assert_eq!(store.list("seoul")[0].title, "Title review-1");
    }

    #[test]
    fn test_update_leaves_other_reviews() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, NoSeed);
        let first = store.add("seoul", draft("seoul", 4, "2024-10-21"));
        let second = store.add("seoul", draft("seoul", 5, "2024-10-20"));

        let patch = ReviewPatch {
            content: Some("changed".into()),
            ..Default::default()
        };
        store.update("seoul", &first.id, &patch);

        let untouched = store
            .list("seoul")
            .into_iter()
            .find(|r| r.id == second.id)
            .unwrap();
        assert_eq!(untouched, second);
    }

    #[test]
    fn test_remove_local_review() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, seed());
        let before = store.list("seoul");
        let added = store.add("seoul", draft("seoul", 1, "2024-10-22"));

        assert!(store.remove("seoul", &added.id));
        assert_eq!(store.list("seoul"), before);
    }

    #[test]
    fn test_remove_seed_or_unknown_is_false() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, seed());

        assert!(!store.remove("seoul", "review-1"));
        assert!(!store.remove("seoul", "local_0_missing"));
        assert_eq!(store.list("seoul").len(), 2);
    }

    #[test]
    fn test_remove_last_review_stores_empty_bucket() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, NoSeed);
        let added = store.add("busan", draft("busan", 3, "2024-10-21"));
        store.remove("busan", &added.id);

        assert_eq!(backend.raw(&review_key("busan")).as_deref(), Some("[]"));
    }

    #[test]
    fn test_average_rating_boundaries() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, NoSeed);
        assert_eq!(store.average_rating("seoul"), 0.0);

        store.add("seoul", draft("seoul", 4, "2024-10-21"));
        assert_eq!(store.average_rating("seoul"), 4.0);
    }

    #[test]
    fn test_average_rating_rounding() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, NoSeed);
        for rating in [5, 4, 3] {
            store.add("a", draft("a", rating, "2024-10-21"));
        }
        for rating in [4, 5, 5] {
            store.add("b", draft("b", rating, "2024-10-21"));
        }

        assert_eq!(store.average_rating("a"), 4.0);
        assert_eq!(store.average_rating("b"), 4.7);
    }

    #[test]
    fn test_average_rating_includes_seed() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, seed());
        assert_eq!(store.average_rating("seoul"), 4.5);

        store.add("seoul", draft("seoul", 3, "2024-10-25"));
        assert_eq!(store.average_rating("seoul"), 4.0);
    }

    #[test]
    fn test_by_rating_is_stable() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, seed());
        let newer_five = store.add("seoul", draft("seoul", 5, "2024-10-25"));

        let ratings: Vec<(u8, String)> = store
            .by_rating("seoul")
            .into_iter()
            .map(|r| (r.rating, r.id))
            .collect();
        assert_eq!(
            ratings,
            vec![
                (5, newer_five.id),
                (5, "review-1".to_string()),
                (4, "review-2".to_string()),
            ]
        );
    }

    #[test]
    fn test_by_date_matches_list() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, seed());
        store.add("seoul", draft("seoul", 2, "2024-10-19"));
        assert_eq!(store.by_date("seoul"), store.list("seoul"));
    }

    #[test]
    fn test_corrupt_bucket_reads_as_seed_only() {
        let backend = MemBackend::new();
        backend.put(&review_key("seoul"), "{{{");
        let store = ReviewStore::new(&backend, seed());

        assert_eq!(store.list("seoul").len(), 2);
        assert!(!store.remove("seoul", "anything"));
    }

    #[test]
    fn test_read_failure_reads_as_seed_only() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, seed());
        store.add("seoul", draft("seoul", 1, "2024-10-21"));
        backend.set_simulate_read_error(true);

        assert_eq!(store.list("seoul").len(), 2);
    }

    #[test]
    fn test_count_by_user() {
        let backend = MemBackend::new();
        let store = ReviewStore::new(&backend, seed());
        store.add("seoul", draft("seoul", 5, "2024-10-21"));
        store.add("busan", draft("busan", 4, "2024-10-21"));

        assert_eq!(
            store.count_by_user(["seoul", "busan", "jeju"], "current_user_123"),
            2
        );
        assert_eq!(store.count_by_user(["seoul"], "user-review-1"), 1);
    }
}
