use super::backend::KvBackend;
use super::{load_json, save_json, PROFILE_KEY};
use crate::model::UserProfile;

/// The single local user profile.
///
/// Reads never fail: an absent or corrupt value yields [`UserProfile::default`].
/// The named setters read-modify-write one field and leave the rest untouched.
pub struct ProfileStore<B: KvBackend> {
    backend: B,
}

impl<B: KvBackend> ProfileStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn get(&self) -> UserProfile {
        load_json(&self.backend, PROFILE_KEY).unwrap_or_default()
    }

    /// Wholesale overwrite.
    pub fn save(&self, profile: &UserProfile) {
        save_json(&self.backend, PROFILE_KEY, profile, "Failed to save profile");
    }

    pub fn set_name(&self, name: &str) {
        self.update(|profile| profile.name = name.to_string());
    }

    pub fn set_bio(&self, bio: &str) {
        self.update(|profile| profile.bio = Some(bio.to_string()));
    }

    pub fn set_avatar(&self, avatar_url: &str) {
        self.update(|profile| profile.avatar_url = Some(avatar_url.to_string()));
    }

    fn update(&self, change: impl FnOnce(&mut UserProfile)) {
        let mut profile = self.get();
        change(&mut profile);
        self.save(&profile);
    }
}
