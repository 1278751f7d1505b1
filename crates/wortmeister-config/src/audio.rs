use std::env;

use serde::{Deserialize, Serialize};

fn default_player() -> String {
    env::var("WORTMEISTER_PLAYER").unwrap_or_else(|_| {
        if cfg!(target_os = "macos") {
            "afplay".to_string()
        } else {
            "aplay -q".to_string()
        }
    })
}

fn default_fallback_tts() -> String {
    env::var("WORTMEISTER_TTS_FALLBACK").unwrap_or_else(|_| {
        if cfg!(target_os = "macos") {
            "say -v Anna".to_string()
        } else {
            "espeak-ng -v de".to_string()
        }
    })
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AudioConfig {
    /// Command that plays a WAV file; the file path is appended
    #[serde(default = "default_player")]
    pub player: String,
    /// On-device synthesizer used when model audio is unavailable; the text is appended
    #[serde(default = "default_fallback_tts")]
    pub fallback_tts: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            player: default_player(),
            fallback_tts: default_fallback_tts(),
        }
    }
}
