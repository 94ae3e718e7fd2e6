use super::backend::KvBackend;
use crate::error::{NomadError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const VALUE_EXT: &str = ".json";

/// Filesystem key-value backend: one file per key under a root directory.
///
/// ```text
/// <root>/
/// ├── nomad_favorites_user.json
/// ├── nomad_bookmarks_user.json
/// ├── nomad_event_participations_user.json
/// ├── nomad_user_profile.json
/// └── nomad_reviews_city_<cityId>.json
/// ```
///
/// Keys are mapped to file names by [`file_stem`], so any non-empty key can
/// be stored.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn value_path(&self, key: &str) -> Result<PathBuf> {
        Ok(self.root.join(format!("{}{}", file_stem(key)?, VALUE_EXT)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NomadError::Io)?;
        }
        Ok(())
    }
}

/// File name stem for `key`.
///
/// Alphanumerics, `_` and `-` are kept as is. Every other character is
/// written as `%XX` per UTF-8 byte, so separators and dots never reach the
/// file system and distinct keys map to distinct names. Only the empty key
/// is rejected.
pub fn file_stem(key: &str) -> Result<String> {
    if key.is_empty() {
        return Err(NomadError::InvalidKey(key.to_string()));
    }

    let mut stem = String::with_capacity(key.len());
    for ch in key.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == '-' {
            stem.push(ch);
        } else {
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                stem.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    Ok(stem)
}

impl KvBackend for FsBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NomadError::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let stem = file_stem(key)?;
        let target_path = self.root.join(format!("{}{}", stem, VALUE_EXT));
        self.ensure_dir()?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(NomadError::Io)?;
        fs::rename(&tmp_path, target_path).map_err(NomadError::Io)?;

        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.value_path(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(NomadError::Io(e)),
        }
    }
}
