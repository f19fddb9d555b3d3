//! API key configuration.
//!
//! Lookup order: `--api-key` flag, the environment, then
//! `~/.mapsweep/config.json` (`{"api_key": "..."}`).

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "MAPSWEEP_API_KEY";

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    api_key: Option<String>,
}

/// Resolve the API key. Empty values count as unset.
pub fn resolve_api_key(flag: Option<&str>) -> Option<String> {
    if let Some(key) = flag {
        if !key.is_empty() {
            return Some(key.to_string());
        }
    }
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.is_empty() {
            return Some(key);
        }
    }
    config_file_key(&default_path())
}

fn default_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mapsweep")
        .join("config.json")
}

/// Read the key from a config file. Missing or malformed files are treated
/// as "no key configured".
fn config_file_key(path: &Path) -> Option<String> {
    let data = fs::read_to_string(path).ok()?;
    let config: ConfigFile = serde_json::from_str(&data).ok()?;
    config.api_key.filter(|key| !key.is_empty())
}
