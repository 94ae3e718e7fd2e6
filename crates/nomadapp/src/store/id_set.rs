//! # Id Set Stores
//!
//! Favorites, bookmarks and event participation are the same store: an ordered
//! list of ids with set semantics, persisted whole under a single key.
//!
//! - `add` is a set union: adding a member again is a no-op.
//! - `remove` is a tolerant set difference: removing a non-member is a no-op.
//! - `toggle` flips membership and reports the **new** state.
//!
//! Favorites and bookmarks wrap the list in a `{"cityIds": [..]}` record;
//! participation stores a bare array. The layouts are kept so that values
//! written by earlier clients keep loading.

use super::backend::KvBackend;
use super::{load_json, save_json, BOOKMARKS_KEY, FAVORITES_KEY, PARTICIPATION_KEY};
use serde::{Deserialize, Serialize};

/// How the id list is laid out in the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdListLayout {
    /// `{"cityIds": ["a", "b"]}`
    CityIds,
    /// `["a", "b"]`
    Flat,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CityIdsRecord {
    #[serde(rename = "cityIds")]
    city_ids: Vec<String>,
}

pub struct IdSetStore<B: KvBackend> {
    backend: B,
    key: &'static str,
    layout: IdListLayout,
    save_failure: &'static str,
}

impl<B: KvBackend> IdSetStore<B> {
    pub fn new(
        backend: B,
        key: &'static str,
        layout: IdListLayout,
        save_failure: &'static str,
    ) -> Self {
        Self {
            backend,
            key,
            layout,
            save_failure,
        }
    }

    /// Favorite city ids.
    pub fn favorites(backend: B) -> Self {
        Self::new(
            backend,
            FAVORITES_KEY,
            IdListLayout::CityIds,
            "Failed to save favorites",
        )
    }

    /// Bookmarked city ids.
    pub fn bookmarks(backend: B) -> Self {
        Self::new(
            backend,
            BOOKMARKS_KEY,
            IdListLayout::CityIds,
            "Failed to save bookmarks",
        )
    }

    /// Ids of events the user has joined.
    pub fn participations(backend: B) -> Self {
        Self::new(
            backend,
            PARTICIPATION_KEY,
            IdListLayout::Flat,
            "Failed to save participation",
        )
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Current ids in insertion order. Empty if nothing is stored or the
    /// stored value is unreadable.
    pub fn list(&self) -> Vec<String> {
        match self.layout {
            IdListLayout::CityIds => load_json::<_, CityIdsRecord>(&self.backend, self.key)
                .map(|record| record.city_ids)
                .unwrap_or_default(),
            IdListLayout::Flat => {
                load_json::<_, Vec<String>>(&self.backend, self.key).unwrap_or_default()
            }
        }
    }

    pub fn has(&self, id: &str) -> bool {
        self.list().iter().any(|existing| existing == id)
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    pub fn add(&self, id: &str) {
        let mut ids = self.list();
        if ids.iter().any(|existing| existing == id) {
            return;
        }
        ids.push(id.to_string());
        self.persist(ids);
    }

    pub fn remove(&self, id: &str) {
        let ids: Vec<String> = self
            .list()
            .into_iter()
            .filter(|existing| existing != id)
            .collect();
        self.persist(ids);
    }

    /// Flip membership of `id`. Returns `true` if `id` is now a member.
    pub fn toggle(&self, id: &str) -> bool {
        if self.has(id) {
            self.remove(id);
            false
        } else {
            self.add(id);
            true
        }
    }

    fn persist(&self, ids: Vec<String>) {
        match self.layout {
            IdListLayout::CityIds => {
                let record = CityIdsRecord { city_ids: ids };
                save_json(&self.backend, self.key, &record, self.save_failure);
            }
            IdListLayout::Flat => {
                save_json(&self.backend, self.key, &ids, self.save_failure);
            }
        }
    }
}
