//! Settings loader for RealTimeScale.
//!
//! * Looks for `realtimescale-settings.toml` in the cwd unless overridden by `--config`.
//! * Every field has a default, so the file is optional.
//!
//! These are tunables for the scroll gesture. The scale preferences themselves
//! live in `RealTimeScale.toml` (see [`crate::store`]).

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::scale::{COARSE_STEP, FINE_STEP, INITIAL_SESSION_SCALE};

pub const DEFAULT_SETTINGS_FILE: &str = "realtimescale-settings.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding `RealTimeScale.toml`. Platform config dir when unset.
    pub store_dir:     Option<PathBuf>,
    /// Scale change per scroll notch.
    pub coarse_step:   f64,
    /// Scale change per scroll notch with Shift held.
    pub fine_step:     f64,
    /// Session scale before any surface has been opened.
    pub initial_scale: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir:     None,
            coarse_step:   COARSE_STEP,
            fine_step:     FINE_STEP,
            initial_scale: INITIAL_SESSION_SCALE,
        }
    }
}

impl Config {
    /// Load from a TOML file; fall back to defaults on any error.
    pub fn load(path: Option<&str>) -> Self {
        let p = path.unwrap_or(DEFAULT_SETTINGS_FILE);
        match fs::read_to_string(p) {
            Ok(text) => Self::from_toml(&text).unwrap_or_else(|err| {
                log::warn!("ignoring malformed settings file {p}: {err}");
                Self::default()
            }),
            Err(_) => {
                log::debug!("no settings file at {p}, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
