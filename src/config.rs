//! Startup configuration read from the environment.

use std::path::PathBuf;

use anyhow::Result;

use crate::capture::DEFAULT_JPEG_QUALITY;

const ENABLE_LOGS: bool = true;
use crate::log_warn;

pub const DATA_DIR_VAR: &str = "KITBAG_DATA_DIR";
pub const DEBUG_VAR: &str = "KITBAG_DEBUG";
pub const BLOB_BASE_URL_VAR: &str = "KITBAG_BLOB_BASE_URL";
pub const JPEG_QUALITY_VAR: &str = "KITBAG_JPEG_QUALITY";

pub const DATABASE_FILE: &str = "kitbag.sqlite3";
pub const SETTINGS_FILE: &str = "settings.json";
pub const BLOB_DIR: &str = "blobs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Overrides the platform app-data directory when set.
    pub data_dir: Option<PathBuf>,
    pub blob_base_url: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            blob_base_url: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Invalid values are reported and
    /// replaced by their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        // The flag itself is consumed by the logger before this runs.
        if let Some(raw) = value(DEBUG_VAR).filter(|raw| parse_flag(raw).is_none()) {
            log_warn!("Ignoring {DEBUG_VAR}={raw}: expected true or false");
        }

        let jpeg_quality = match value(JPEG_QUALITY_VAR) {
            None => defaults.jpeg_quality,
            Some(raw) => match raw.parse::<u8>() {
                Ok(quality) if (1..=100).contains(&quality) => quality,
                _ => {
                    log_warn!("Ignoring {JPEG_QUALITY_VAR}={raw}: expected 1-100");
                    defaults.jpeg_quality
                }
            },
        };

        Self {
            data_dir: value(DATA_DIR_VAR).map(PathBuf::from),
            blob_base_url: value(BLOB_BASE_URL_VAR),
            jpeg_quality,
        }
    }

    /// The configured data directory, else the platform default. The default
    /// is only computed when no override is set.
    pub fn resolve_data_dir<F>(&self, platform_default: F) -> Result<PathBuf>
    where
        F: FnOnce() -> Result<PathBuf>,
    {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => platform_default(),
        }
    }
}

/// Reads only the debug flag, without reporting bad values. Used before the
/// logger exists.
pub fn debug_from_env() -> bool {
    debug_from_lookup(|key| std::env::var(key).ok())
}

pub fn debug_from_lookup<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(DEBUG_VAR)
        .and_then(|raw| parse_flag(&raw))
        .unwrap_or(false)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
