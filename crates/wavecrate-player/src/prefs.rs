//! Persisted player preferences.
//!
//! A small string key-value contract: synchronous get/set, no transactions,
//! no expiry. When the backing storage is unavailable, reads return absent
//! and writes are silently dropped; the controller falls back to defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Synchronous string key-value storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Infallible by contract; a failing backend drops the write.
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store. Used by tests and as the degraded fallback.
#[derive(Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Write-through store backed by a JSON object on disk.
///
/// Every `set` rewrites the file so a crash mid-playback loses at most the
/// most recent unflushed field. Read or write failures degrade to the
/// in-memory view.
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing values if the file parses.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(values) => values,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "preference file malformed, starting empty");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(path = %self.path.display(), error = %e, "preference write dropped");
                return;
            }
        }
        let content = match serde_json::to_string_pretty(&self.values) {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, "preference serialization failed");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, content) {
            warn!(path = %self.path.display(), error = %e, "preference write dropped");
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }
}

/// Namespaced key names for one player widget.
///
/// The store is shared across widgets, so concurrent widgets should be given
/// distinct namespaces rather than the fixed global names.
#[derive(Debug, Clone)]
pub struct PrefKeys {
    namespace: String,
}

impl PrefKeys {
    pub const DEFAULT_NAMESPACE: &'static str = "audioPlayer";

    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn volume(&self) -> String {
        format!("{}-volume", self.namespace)
    }

    pub fn current_time(&self) -> String {
        format!("{}-currentTime", self.namespace)
    }

    pub fn is_playing(&self) -> String {
        format!("{}-isPlaying", self.namespace)
    }
}

impl Default for PrefKeys {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAMESPACE)
    }
}

/// Typed view over a [`PreferenceStore`] for the player's three fields.
///
/// Malformed stored values parse to `None` and are treated as absent.
pub struct PlayerPrefs {
    store: Box<dyn PreferenceStore>,
    keys: PrefKeys,
}

impl PlayerPrefs {
    pub fn new(store: Box<dyn PreferenceStore>, keys: PrefKeys) -> Self {
        Self { store, keys }
    }

    pub fn volume(&self) -> Option<f64> {
        self.parse_number(&self.keys.volume())
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.store.set(&self.keys.volume(), &volume.to_string());
    }

    pub fn current_time(&self) -> Option<f64> {
        self.parse_number(&self.keys.current_time())
    }

    pub fn set_current_time(&mut self, time_sec: f64) {
        self.store
            .set(&self.keys.current_time(), &time_sec.to_string());
    }

    pub fn is_playing(&self) -> Option<bool> {
        match self.store.get(&self.keys.is_playing())?.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    pub fn set_is_playing(&mut self, playing: bool) {
        self.store.set(&self.keys.is_playing(), &playing.to_string());
    }

    fn parse_number(&self, key: &str) -> Option<f64> {
        let value = self.store.get(key)?;
        value.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}
