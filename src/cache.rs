//! Persisted run statistics.
//!
//! A best-effort byte store keyed by a run identifier (typically the name of
//! what was analyzed). Nothing here fails the caller: a missing or
//! unreadable entry loads as `None`, and a failed save is logged and
//! reported as `false`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::env::EnvSettings;

/// Stats files are named `{id}{RECURSION}.stats`.
const RECURSION: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct StatsCache {
    dir: PathBuf,
}

impl StatsCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache in the app's data directory (`{APP}HOME` or `~/.{app}.d`).
    pub fn from_env(app_name: &str) -> Self {
        Self::new(EnvSettings::from_env(app_name).data_dir(app_name))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the entry for `id`. Path separators in `id` become `_`.
    pub fn path_for(&self, id: &str) -> PathBuf {
        let base: String = id
            .chars()
            .map(|c| if std::path::is_separator(c) { '_' } else { c })
            .collect();
        self.dir.join(format!("{base}{RECURSION}.stats"))
    }

    pub fn load(&self, id: &str) -> Option<Vec<u8>> {
        let path = self.path_for(id);
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Unable to read stats file {}: {e}", path.display());
                None
            }
        }
    }

    /// Store `bytes` for `id`, creating the cache directory if needed.
    pub fn save(&self, id: &str, bytes: &[u8]) -> bool {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            log::warn!("Unable to create directory {}: {e}", self.dir.display());
            return false;
        }
        let path = self.path_for(id);
        match std::fs::write(&path, bytes) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Unable to create file {}: {e}", path.display());
                false
            }
        }
    }

    /// Load and decode a JSON entry. Undecodable data counts as missing.
    pub fn load_json<T: DeserializeOwned>(&self, id: &str) -> Option<T> {
        let bytes = self.load(id)?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring corrupt stats for '{id}': {e}");
                None
            }
        }
    }

    pub fn save_json<T: Serialize>(&self, id: &str, value: &T) -> bool {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.save(id, &bytes),
            Err(e) => {
                log::warn!("Unable to encode stats for '{id}': {e}");
                false
            }
        }
    }
}
