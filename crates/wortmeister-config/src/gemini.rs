use std::env;

use serde::{Deserialize, Serialize};

fn default_api_key() -> Option<String> {
    env::var("GEMINI_API_KEY")
        .or_else(|_| env::var("VITE_GEMINI_API_KEY"))
        .ok()
        .filter(|key| !key.trim().is_empty())
}

fn default_base_url() -> String {
    env::var("GEMINI_BASE_URL")
        .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string())
}

fn default_text_model() -> String {
    env::var("GEMINI_TEXT_MODEL").unwrap_or_else(|_| "gemini-2.5-flash-preview-09-2025".to_string())
}

fn default_speech_model() -> String {
    env::var("GEMINI_TTS_MODEL").unwrap_or_else(|_| "gemini-2.5-flash-preview-tts".to_string())
}

fn default_voice() -> String {
    env::var("GEMINI_VOICE").unwrap_or_else(|_| "Kore".to_string())
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    /// Never written back to disk
    #[serde(default = "default_api_key", skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model used for word analysis
    #[serde(default = "default_text_model")]
    pub text_model: String,
    /// Model used for pronunciation audio
    #[serde(default = "default_speech_model")]
    pub speech_model: String,
    /// Prebuilt voice name for speech output
    #[serde(default = "default_voice")]
    pub voice: String,
}

impl GeminiConfig {
    /// `generateContent` URL for the given model, without the key
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    pub fn text_endpoint(&self) -> String {
        self.endpoint(&self.text_model)
    }

    pub fn speech_endpoint(&self) -> String {
        self.endpoint(&self.speech_model)
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
            text_model: default_text_model(),
            speech_model: default_speech_model(),
            voice: default_voice(),
        }
    }
}

// Manual impl so the key never ends up in logs
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("speech_model", &self.speech_model)
            .field("voice", &self.voice)
            .finish()
    }
}
