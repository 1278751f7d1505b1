use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("WORTMEISTER_DATA_DIR") {
        return PathBuf::from(dir);
    }

    dirs::data_dir()
        .map(|dir| dir.join("wortmeister"))
        .unwrap_or_else(|| PathBuf::from(".wortmeister"))
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `german_history`, `german_xp` and cached audio
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn audio_dir(&self) -> PathBuf {
        self.data_dir.join("audio")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}
