//! File-backed scale preferences.
//!
//! * Every read reparses the file; nothing is cached between calls.
//! * Every write rewrites the whole file from a freshly loaded table.
//! * Read failures are logged and behave like a missing file.
//! * Write failures are logged and reported as `false` (or `Err` from the `try_*` variants).
//!
//! Writes issued through one [`ScalePreferenceStore`] are serialized. Two
//! stores pointed at the same file (or two processes) can still lose an update:
//! the later read-modify-write wins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use log::{debug, error, info, warn};

use crate::scale::{round2, sanitize, FALLBACK_DEFAULT_SCALE, SEED_DEFAULT_SCALE};
use crate::table::{ScaleTable, DEFAULT_KEY};

/// Name of the preference file inside the config directory.
pub const FILE_NAME: &str = "RealTimeScale.toml";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not resolve a config directory")]
    ConfigDir,
    #[error("\"{0}\" is reserved for the default entry")]
    ReservedKey(String),
    #[error("context key {0:?} cannot be stored in the preference file")]
    InvalidKey(String),
}

/// What the scale session needs from a preference store.
pub trait ScaleStore {
    /// Persisted default, or the read fallback when none is stored.
    fn get_default_scale(&self) -> f64;
    /// Persisted value for `key`, or [`ScaleStore::get_default_scale`].
    fn get_scale(&self, key: &str) -> f64;
    /// Upsert the default entry. Returns whether the file was written.
    fn set_default_scale(&self, value: f64) -> bool;
    /// Upsert `key`. Returns whether the file was written.
    fn set_scale(&self, key: &str, value: f64) -> bool;
}

/// Scale preferences stored in `RealTimeScale.toml`.
#[derive(Debug)]
pub struct ScalePreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ScalePreferenceStore {
    /// Store backed by `dir/RealTimeScale.toml`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::at_path(dir.as_ref().join(FILE_NAME))
    }

    /// Store backed by an explicit file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store rooted at the platform config directory (e.g. `~/.config/realtimescale` on Linux).
    pub fn from_config_dir() -> Result<Self, StoreError> {
        let proj =
            ProjectDirs::from("dev", "realtimescale", "RealTimeScale").ok_or(StoreError::ConfigDir)?;
        Ok(Self::new(proj.config_dir()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persisted default, or [`FALLBACK_DEFAULT_SCALE`].
    ///
    /// Only the first default line counts; if it does not parse, the fallback applies.
    pub fn get_default_scale(&self) -> f64 {
        self.read_text()
            .and_then(|text| ScaleTable::first_default(&text))
            .unwrap_or(FALLBACK_DEFAULT_SCALE)
    }

    /// Persisted value for `key`, falling back to [`Self::get_default_scale`].
    pub fn get_scale(&self, key: &str) -> f64 {
        let text = self.read_text();
        let found = text.as_deref().and_then(|t| ScaleTable::parse(t).get(key));
        match found {
            Some(scale) => scale,
            None => text
                .as_deref()
                .and_then(ScaleTable::first_default)
                .unwrap_or(FALLBACK_DEFAULT_SCALE),
        }
    }

    pub fn set_default_scale(&self, value: f64) -> bool {
        report(self.try_set_default_scale(value))
    }

    pub fn set_scale(&self, key: &str, value: f64) -> bool {
        report(self.try_set_scale(key, value))
    }

    pub fn try_set_default_scale(&self, value: f64) -> Result<(), StoreError> {
        self.upsert(DEFAULT_KEY, value)
    }

    pub fn try_set_scale(&self, key: &str, value: f64) -> Result<(), StoreError> {
        if key == DEFAULT_KEY {
            return Err(StoreError::ReservedKey(key.to_owned()));
        }
        if key.is_empty() || key.contains(['"', '=', '\n', '\r']) {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        self.upsert(key, value)
    }

    /// Freshly parsed table as it would be rewritten on the next write.
    pub fn entries(&self) -> ScaleTable {
        self.load_for_write()
    }

    fn upsert(&self, key: &str, value: f64) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut table = self.load_for_write();
        let stored = sanitize(round2(value));
        if stored != round2(value) {
            warn!("scale {value} for \"{key}\" out of range, storing {stored:.2}");
        }
        table.upsert(key, stored);
        self.save(&table)?;
        debug!("stored \"{key}\" = {stored:.2} in {}", self.path.display());
        Ok(())
    }

    /// File contents, or `None` when missing or unreadable.
    fn read_text(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!("failed to read {}: {err}", self.path.display());
                None
            }
        }
    }

    /// Table used as the base of a write. Always carries a default entry,
    /// seeded with [`SEED_DEFAULT_SCALE`] when the file has none.
    fn load_for_write(&self) -> ScaleTable {
        let mut table = self
            .read_text()
            .map(|text| ScaleTable::parse(&text))
            .unwrap_or_default();
        table.insert_if_absent(DEFAULT_KEY, SEED_DEFAULT_SCALE);
        table
    }

    fn save(&self, table: &ScaleTable) -> Result<(), StoreError> {
        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
                info!("created config directory {}", parent.display());
            }
        }
        fs::write(&self.path, table.render()).map_err(io_err)
    }
}

impl ScaleStore for ScalePreferenceStore {
    fn get_default_scale(&self) -> f64 {
        ScalePreferenceStore::get_default_scale(self)
    }

    fn get_scale(&self, key: &str) -> f64 {
        ScalePreferenceStore::get_scale(self, key)
    }

    fn set_default_scale(&self, value: f64) -> bool {
        ScalePreferenceStore::set_default_scale(self, value)
    }

    fn set_scale(&self, key: &str, value: f64) -> bool {
        ScalePreferenceStore::set_scale(self, key, value)
    }
}

fn report(result: Result<(), StoreError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            error!("failed to save scale preference: {err}");
            false
        }
    }
}
