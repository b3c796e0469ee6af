// src/config.rs

use crate::game::search::SearchConfig;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("profile I/O failed for {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("profile {path} is not a valid search config: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
}

fn profile_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", name))
}

pub fn save_profile(dir: &Path, name: &str, config: &SearchConfig) -> Result<(), ConfigError> {
    let path = profile_path(dir, name);
    let json = serde_json::to_string_pretty(config)
        .map_err(|source| ConfigError::Json { path: path.clone(), source })?;
    fs::create_dir_all(dir)
        .and_then(|_| fs::File::create(&path))
        .and_then(|mut file| file.write_all(json.as_bytes()))
        .map_err(|source| ConfigError::Io { path, source })
}

pub fn load_profile(dir: &Path, name: &str) -> Result<SearchConfig, ConfigError> {
    let path = profile_path(dir, name);
    let json = fs::read_to_string(&path).map_err(|source| ConfigError::Io { path: path.clone(), source })?;
    serde_json::from_str(&json).map_err(|source| ConfigError::Json { path, source })
}

/// Names of the profiles stored in `dir`, sorted. A missing directory has none.
pub fn list_profiles(dir: &Path) -> Result<Vec<String>, ConfigError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(ConfigError::Io { path: dir.to_path_buf(), source }),
    };

    let mut profiles = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ConfigError::Io { path: dir.to_path_buf(), source })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            if let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) {
                profiles.push(name.to_string());
            }
        }
    }
    profiles.sort();
    Ok(profiles)
}
