//! # Storage Layer
//!
//! The client-side persistent store is a family of independently keyed
//! sub-stores over one durable key-value medium, abstracted by [`KvBackend`].
//!
//! ## Sub-stores
//!
//! | Store | Key | Stored value |
//! |-------|-----|--------------|
//! | Favorites | `nomad_favorites_user` | `{"cityIds": [..]}` |
//! | Bookmarks | `nomad_bookmarks_user` | `{"cityIds": [..]}` |
//! | Event participation | `nomad_event_participations_user` | `[..]` |
//! | Profile | `nomad_user_profile` | profile object |
//! | Reviews (per city) | `nomad_reviews_city_<cityId>` | `[review, ..]` |
//!
//! Key names must stay stable: they are how values survive across sessions.
//!
//! ## Read-Modify-Write
//!
//! Every mutation reads the current value for its key, computes the new value,
//! and writes the **whole** value back. There is no incremental patching and no
//! cross-key transaction; a crash between writes to two different stores can
//! leave them inconsistent relative to each other.
//!
//! ## Total Operations
//!
//! Sub-store operations never return errors:
//! - A missing, unreadable, or corrupt value reads as empty (or the default profile).
//! - A failed write is logged and dropped; the caller returns normally.
//!
//! Backends themselves return [`Result`](crate::error::Result); absorbing their
//! errors happens once, in [`load_json`] and [`save_json`].
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production backend, one JSON file per key.
//! - [`mem_backend::MemBackend`]: In-memory backend with error simulation for tests.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

pub mod backend;
pub mod fs_backend;
pub mod id_set;
pub mod mem_backend;
pub mod profile;
pub mod reviews;

pub use backend::KvBackend;
pub use id_set::IdSetStore;
pub use profile::ProfileStore;
pub use reviews::{NoSeed, ReviewSeed, ReviewStore};

pub const FAVORITES_KEY: &str = "nomad_favorites_user";
pub const BOOKMARKS_KEY: &str = "nomad_bookmarks_user";
pub const PARTICIPATION_KEY: &str = "nomad_event_participations_user";
pub const PROFILE_KEY: &str = "nomad_user_profile";
pub const REVIEW_KEY_PREFIX: &str = "nomad_reviews_city_";

/// Key of the review bucket for one city.
pub fn review_key(city_id: &str) -> String {
    format!("{}{}", REVIEW_KEY_PREFIX, city_id)
}

/// Read and decode the value under `key`.
///
/// Returns `None` when nothing is stored, the backend fails, or the payload
/// does not decode. Failures are logged, never propagated.
pub fn load_json<B, T>(backend: &B, key: &str) -> Option<T>
where
    B: KvBackend + ?Sized,
    T: DeserializeOwned,
{
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored value");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored value");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Discarding corrupt stored value");
            None
        }
    }
}

/// Encode and write `value` under `key`.
///
/// Returns whether the write reached the backend. On failure `failure` is
/// logged as the diagnostic message and the write is dropped.
pub fn save_json<B, T>(backend: &B, key: &str, value: &T, failure: &str) -> bool
where
    B: KvBackend + ?Sized,
    T: Serialize + ?Sized,
{
    let written = serde_json::to_string(value)
        .map_err(crate::error::NomadError::from)
        .and_then(|raw| backend.set(key, &raw));

    match written {
        Ok(()) => {
            debug!(key, "stored value");
            true
        }
        Err(e) => {
            error!(key, error = %e, "{}", failure);
            false
        }
    }
}
