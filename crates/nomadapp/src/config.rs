//! # Configuration
//!
//! Nomad configuration is a [`confique`] struct loaded through [`clapfig`]
//! (see [`crate::init::load_config`]), layered in priority order:
//!
//! 1. **Environment variables**: `NOMAD__CITIES_FILE`, `NOMAD__DEFAULT_SORT`, etc.
//! 2. **Config file**: `<data_dir>/nomad.toml`.
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! A config that cannot be loaded is replaced by the defaults.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `cities_file` | `cities.json` | JSON array of city records |
//! | `seed_reviews_file` | `reviews.json` | JSON array of read-only seed reviews |
//! | `default_sort` | `overall` | Sort used when none is given |
//!
//! Relative file paths resolve against the data directory.

use crate::filters::SortKey;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const CONFIG_FILE: &str = "nomad.toml";
pub const DEFAULT_CITIES_FILE: &str = "cities.json";
pub const DEFAULT_SEED_REVIEWS_FILE: &str = "reviews.json";

/// Configuration for nomad, stored in `nomad.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NomadConfig {
    /// City records. When absent, `cities.json` in the data directory.
    pub cities_file: Option<String>,

    /// Seed reviews. When absent, `reviews.json` in the data directory.
    pub seed_reviews_file: Option<String>,

    /// One of: overall, cheap, fast, active, quality, reviews
    #[config(default = "overall")]
    pub default_sort: String,
}

impl Default for NomadConfig {
    fn default() -> Self {
        Self {
            cities_file: None,
            seed_reviews_file: None,
            default_sort: SortKey::Overall.to_string(),
        }
    }
}

impl NomadConfig {
    /// The configured default sort. An unknown name falls back to `overall`.
    pub fn default_sort(&self) -> SortKey {
        self.default_sort.parse().unwrap_or_else(|e: String| {
            warn!(error = %e, "Ignoring configured default_sort");
            SortKey::default()
        })
    }

    pub fn cities_path(&self, data_dir: &Path) -> PathBuf {
        resolve(data_dir, self.cities_file.as_deref(), DEFAULT_CITIES_FILE)
    }

    pub fn seed_reviews_path(&self, data_dir: &Path) -> PathBuf {
        resolve(
            data_dir,
            self.seed_reviews_file.as_deref(),
            DEFAULT_SEED_REVIEWS_FILE,
        )
    }
}

fn resolve(data_dir: &Path, configured: Option<&str>, fallback: &str) -> PathBuf {
    let path = PathBuf::from(configured.unwrap_or(fallback));
    if path.is_absolute() {
        path
    } else {
        data_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NomadConfig::default();
        assert_eq!(config.default_sort(), SortKey::Overall);
        assert!(config.cities_file.is_none());
    }

    #[test]
    fn test_default_sort_parsing() {
        let config = NomadConfig {
            default_sort: "cheap".to_string(),
            ..Default::default()
        };
        assert_eq!(config.default_sort(), SortKey::Cheap);
    }

    #[test]
    fn test_unknown_default_sort_falls_back() {
        let config = NomadConfig {
            default_sort: "alphabetical".to_string(),
            ..Default::default()
        };
        assert_eq!(config.default_sort(), SortKey::Overall);
    }

    #[test]
    fn test_paths_default_to_data_dir() {
        let config = NomadConfig::default();
        let dir = Path::new("/data/nomad");
        assert_eq!(config.cities_path(dir), dir.join("cities.json"));
        assert_eq!(config.seed_reviews_path(dir), dir.join("reviews.json"));
    }

    #[test]
    fn test_relative_and_absolute_paths() {
        let config = NomadConfig {
            cities_file: Some("sets/korea.json".to_string()),
            seed_reviews_file: Some("/srv/seed.json".to_string()),
            ..Default::default()
        };
        let dir = Path::new("/data/nomad");
        assert_eq!(config.cities_path(dir), dir.join("sets/korea.json"));
        assert_eq!(config.seed_reviews_path(dir), PathBuf::from("/srv/seed.json"));
    }
}
