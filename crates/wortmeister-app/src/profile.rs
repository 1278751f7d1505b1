use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use wortmeister_config::Config;

const PROFILE_FILE: &str = "config.json";

/// Profile file location inside a data directory
pub fn profile_path(data_dir: &Path) -> PathBuf {
    data_dir.join(PROFILE_FILE)
}

/// Environment config, overridden by `config.json` in the data directory if
/// present. `data_dir_override` (the `--data-dir` flag) wins over both.
pub fn load_config(data_dir_override: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::new();
    if let Some(dir) = data_dir_override {
        config.storage.data_dir = dir.to_path_buf();
    }

    let profile = profile_path(&config.storage.data_dir);
    if !profile.exists() {
        tracing::debug!("No profile at {}, using environment", profile.display());
        return Ok(config);
    }

    tracing::info!("Loading profile from {}", profile.display());
    let data = fs::read_to_string(&profile)
        .with_context(|| format!("Failed to read profile {}", profile.display()))?;
    let mut from_file: Config = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse profile {}", profile.display()))?;

    if let Some(dir) = data_dir_override {
        from_file.storage.data_dir = dir.to_path_buf();
    }

    Ok(from_file)
}
