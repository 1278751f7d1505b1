use std::env;

use serde::{Deserialize, Serialize};
use wortmeister_types::Level;

use self::audio::AudioConfig;
use self::gemini::GeminiConfig;
use self::storage::StorageConfig;

pub mod audio;
pub mod gemini;
pub mod storage;

fn default_level() -> Level {
    match env::var("WORTMEISTER_LEVEL") {
        Ok(value) => value.parse().unwrap_or_else(|e| {
            tracing::warn!("Ignoring WORTMEISTER_LEVEL: {}", e);
            Level::default()
        }),
        Err(_) => Level::default(),
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub storage: StorageConfig,
    pub audio: AudioConfig,

    /// Level the session starts with
    #[serde(default = "default_level")]
    pub level: Level,
}

impl Config {
    /// Build from environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            gemini: GeminiConfig::default(),
            storage: StorageConfig::default(),
            audio: AudioConfig::default(),

            level: default_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "gemini": { "voice": "Puck" }, "level": "C1" }"#).unwrap();

        assert_eq!(config.gemini.voice, "Puck");
        assert_eq!(config.level, Level::C1);
        assert!(!config.gemini.text_model.is_empty());
        assert!(!config.audio.fallback_tts.is_empty());
    }

    #[test]
    fn test_endpoint_joins_base_and_model() {
        let gemini = GeminiConfig {
            api_key: None,
            base_url: "http://localhost:9000/v1beta/".to_string(),
            text_model: "text-model".to_string(),
            speech_model: "tts-model".to_string(),
            voice: "Kore".to_string(),
        };

        assert_eq!(
            gemini.text_endpoint(),
            "http://localhost:9000/v1beta/models/text-model:generateContent"
        );
        assert_eq!(
            gemini.speech_endpoint(),
            "http://localhost:9000/v1beta/models/tts-model:generateContent"
        );
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let mut config = Config::new();
        config.gemini.api_key = Some("secret".to_string());

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
