//! # API Facade
//!
//! [`NomadApi`] is the single entry point a UI uses to reach the data layer.
//! It owns the key-value backend and the review seed, and hands out short-lived
//! sub-store views that borrow them.
//!
//! ## What the API Does
//!
//! - **Wires stores**: every view shares the same backend, so the favorites a
//!   user saves are the favorites the filter gate reads.
//! - **Validates input**: [`NomadApi::add_review`] and
//!   [`NomadApi::update_review`] reject bad form input before the store sees it.
//!   The stores themselves accept anything and never fail.
//! - **Aggregates**: [`NomadApi::activity_stats`] summarises the user's
//!   activity across stores.
//!
//! ## What the API Does NOT Do
//!
//! - No stdout/stderr, no process exit, no formatting.
//! - No loading of city or seed files; that is [`crate::init`]'s job.
//!
//! ## Generic Over KvBackend and ReviewSeed
//!
//! - Production: `NomadApi<FsBackend, Vec<Review>>`
//! - Testing: `NomadApi<MemBackend, Vec<Review>>` or `NomadApi<MemBackend, NoSeed>`

use crate::error::Result;
use crate::filters::{apply_filters, FilterParams};
use crate::model::{City, Review, ReviewDraft, ReviewPatch};
use crate::store::{IdSetStore, KvBackend, ProfileStore, ReviewSeed, ReviewStore};
use crate::validation::{validate_draft, validate_patch};
use serde::Serialize;

/// Summary of what the current user has done, as shown on their dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActivityStats {
    pub reviews_written: usize,
    pub events_joined: usize,
    pub favorites: usize,
    pub bookmarks: usize,
}

pub struct NomadApi<B: KvBackend, S: ReviewSeed> {
    backend: B,
    seed: S,
}

impl<B: KvBackend, S: ReviewSeed> NomadApi<B, S> {
    pub fn new(backend: B, seed: S) -> Self {
        Self { backend, seed }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn reviews(&self) -> ReviewStore<&B, &S> {
        ReviewStore::new(&self.backend, &self.seed)
    }

    pub fn favorites(&self) -> IdSetStore<&B> {
        IdSetStore::favorites(&self.backend)
    }

    pub fn bookmarks(&self) -> IdSetStore<&B> {
        IdSetStore::bookmarks(&self.backend)
    }

    pub fn participations(&self) -> IdSetStore<&B> {
        IdSetStore::participations(&self.backend)
    }

    pub fn profile(&self) -> ProfileStore<&B> {
        ProfileStore::new(&self.backend)
    }

    /// Run the filter pipeline with gates backed by this API's stores.
    pub fn filter_cities(&self, cities: &[City], params: &FilterParams) -> Vec<City> {
        apply_filters(cities, params, &self.backend)
    }

    /// Validate and store a new review.
    pub fn add_review(&self, draft: ReviewDraft) -> Result<Review> {
        validate_draft(&draft)?;
        let city_id = draft.city_id.clone();
        Ok(self.reviews().add(&city_id, draft))
    }

    /// Validate and apply a patch. `Ok(None)` means the review is not a local one.
    pub fn update_review(
        &self,
        city_id: &str,
        review_id: &str,
        patch: &ReviewPatch,
    ) -> Result<Option<Review>> {
        validate_patch(patch)?;
        Ok(self.reviews().update(city_id, review_id, patch))
    }

    /// Activity of `user_id`. Reviews are counted across `city_ids` only, since
    /// review buckets are keyed per city.
    pub fn activity_stats<I, C>(&self, user_id: &str, city_ids: I) -> ActivityStats
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        ActivityStats {
            reviews_written: self.reviews().count_by_user(city_ids, user_id),
            events_joined: self.participations().len(),
            favorites: self.favorites().len(),
            bookmarks: self.bookmarks().len(),
        }
    }
}
