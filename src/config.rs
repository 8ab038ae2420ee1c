//! Editor configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::consts::{DEFAULT_AUTOSAVE_INTERVAL_SECS, DEFAULT_AUTOSAVE_PATH, DEFAULT_PASTE_OFFSET_PX};

pub const AUTOSAVE_INTERVAL_ENV: &str = "SLIDEDECK_AUTOSAVE_INTERVAL_SECS";
pub const AUTOSAVE_PATH_ENV: &str = "SLIDEDECK_AUTOSAVE_PATH";
pub const HISTORY_LIMIT_ENV: &str = "SLIDEDECK_HISTORY_LIMIT";
pub const PASTE_OFFSET_ENV: &str = "SLIDEDECK_PASTE_OFFSET_PX";

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Time between autosave writes.
    pub autosave_interval: Duration,
    /// File written by the autosave task.
    pub autosave_path: PathBuf,
    /// Maximum history entries kept; 0 keeps everything.
    pub history_limit: usize,
    /// Offset applied to pasted and duplicated elements.
    pub paste_offset_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave_interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            autosave_path: PathBuf::from(DEFAULT_AUTOSAVE_PATH),
            history_limit: 0,
            paste_offset_px: DEFAULT_PASTE_OFFSET_PX,
        }
    }
}

impl EditorConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `SLIDEDECK_AUTOSAVE_INTERVAL_SECS`: default 30, values below 1 use the default
    /// - `SLIDEDECK_AUTOSAVE_PATH`: default `presentation.json`
    /// - `SLIDEDECK_HISTORY_LIMIT`: default 0 (unlimited)
    /// - `SLIDEDECK_PASTE_OFFSET_PX`: default 12
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup. Missing or unparsable
    /// values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let interval_secs = lookup_parse(&lookup, AUTOSAVE_INTERVAL_ENV, DEFAULT_AUTOSAVE_INTERVAL_SECS);
        let interval_secs = if interval_secs == 0 { DEFAULT_AUTOSAVE_INTERVAL_SECS } else { interval_secs };

        let autosave_path = lookup(AUTOSAVE_PATH_ENV)
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .map_or(defaults.autosave_path, PathBuf::from);

        let paste_offset_px = lookup_parse(&lookup, PASTE_OFFSET_ENV, DEFAULT_PASTE_OFFSET_PX);
        let paste_offset_px = if paste_offset_px.is_finite() { paste_offset_px } else { DEFAULT_PASTE_OFFSET_PX };

        Self {
            autosave_interval: Duration::from_secs(interval_secs),
            autosave_path,
            history_limit: lookup_parse(&lookup, HISTORY_LIMIT_ENV, defaults.history_limit),
            paste_offset_px,
        }
    }
}

fn lookup_parse<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Copy,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        _ => default,
    }
}
