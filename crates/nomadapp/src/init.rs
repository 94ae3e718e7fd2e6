//! # Data Directory and Startup
//!
//! Everything nomad keeps on disk lives under one data directory:
//!
//! ```text
//! <data_dir>/
//! ├── nomad.toml        optional configuration
//! ├── cities.json       city records (read-only, supplied externally)
//! ├── reviews.json      seed reviews (read-only, supplied externally)
//! └── store/            key-value values written by the stores
//! ```
//!
//! ## Resolution Order
//!
//! [`resolve_data_dir`] picks the first of:
//! 1. An explicit override (the CLI's `--data` flag).
//! 2. The `NOMAD_DATA_DIR` environment variable, used by tests to isolate state.
//! 3. The OS-appropriate data directory via the `directories` crate.
//!
//! ## External Record Sources
//!
//! Cities and seed reviews are plain JSON arrays. A missing file is an empty
//! collection, so a fresh install starts with nothing to browse rather than an
//! error. A file that exists but does not parse is reported to the caller.

use crate::api::NomadApi;
use crate::config::{NomadConfig, CONFIG_FILE};
use crate::error::{NomadError, Result};
use crate::model::{City, Review};
use crate::store::fs_backend::FsBackend;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATA_DIR_ENV: &str = "NOMAD_DATA_DIR";
pub const STORE_DIR: &str = "store";

pub struct NomadContext {
    pub api: NomadApi<FsBackend, Vec<Review>>,
    pub config: NomadConfig,
    pub cities: Vec<City>,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "nomad", "nomad")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NomadError::Config("Could not determine data directory".to_string()))
}

/// Load `nomad.toml` from `data_dir`, layered with `NOMAD__*` variables.
pub fn load_config(data_dir: &Path) -> NomadConfig {
    debug!(path = %data_dir.join(CONFIG_FILE).display(), "loading config");
    Clapfig::builder()
        .app_name("nomad")
        .file_name(CONFIG_FILE)
        .search_paths(vec![SearchPath::Path(data_dir.to_path_buf())])
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default()
}

/// Read a JSON array of records. A missing file yields an empty vector.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "record source missing, using empty collection");
            return Ok(Vec::new());
        }
        Err(e) => return Err(NomadError::Io(e)),
    };

    serde_json::from_str(&raw)
        .map_err(|e| NomadError::Config(format!("{}: {}", path.display(), e)))
}

/// Resolve the data directory, load configuration and record sources, and
/// open the filesystem store.
pub fn initialize(data_override: Option<PathBuf>) -> Result<NomadContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = load_config(&data_dir);

    let cities: Vec<City> = load_records(&config.cities_path(&data_dir))?;
    let seed: Vec<Review> = load_records(&config.seed_reviews_path(&data_dir))?;
    debug!(
        data_dir = %data_dir.display(),
        cities = cities.len(),
        seed_reviews = seed.len(),
        "initialized"
    );

    let backend = FsBackend::new(data_dir.join(STORE_DIR));
    let api = NomadApi::new(backend, seed);

    Ok(NomadContext {
        api,
        config,
        cities,
        data_dir,
    })
}
