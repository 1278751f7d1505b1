use std::sync::Arc;

use base64::Engine as _;
use wortmeister_config::gemini::GeminiConfig;

use crate::audio::AudioClip;
use crate::error::SpeechError;
use crate::transport::{ReqwestTransport, Transport};
use crate::wire::{GenerateRequest, GenerateResponse};

/// Pronunciation audio through the speech generation endpoint.
///
/// Failures never leave this client: `synthesize` returns `None` and the
/// caller falls back to an on-device synthesizer.
#[derive(Clone)]
pub struct SpeechClient {
    transport: Arc<dyn Transport>,
    api_key: Option<String>,
    endpoint: String,
    voice: String,
}

impl SpeechClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(config: &GeminiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            api_key: config.api_key.clone(),
            endpoint: config.speech_endpoint(),
            voice: config.voice.clone(),
        }
    }

    pub async fn synthesize(&self, text: &str) -> Option<AudioClip> {
        if text.trim().is_empty() {
            return None;
        }

        match self.try_synthesize(text).await {
            Ok(clip) => {
                tracing::debug!("Synthesized {} bytes of {}", clip.data.len(), clip.mime_type);
                Some(clip)
            }
            Err(e) => {
                tracing::warn!("TTS failed: {}", e);
                None
            }
        }
    }

    async fn try_synthesize(&self, text: &str) -> Result<AudioClip, SpeechError> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(SpeechError::Config),
        };

        let body = serde_json::to_string(&GenerateRequest::speech(text, &self.voice))
            .map_err(|e| SpeechError::Decode(format!("Failed to encode request: {e}")))?;

        let raw = self
            .transport
            .post_json(&self.endpoint, api_key, body)
            .await?;

        let response: GenerateResponse = serde_json::from_str(&raw)
            .map_err(|e| SpeechError::Decode(format!("Failed to parse response: {e}")))?;

        let inline = response
            .into_first_part()
            .and_then(|part| part.inline_data)
            .ok_or_else(|| SpeechError::Decode("No inline audio in response".to_string()))?;

        let data = base64::engine::general_purpose::STANDARD.decode(inline.data.trim())?;
        if data.is_empty() {
            return Err(SpeechError::Empty);
        }

        Ok(AudioClip::new(data, inline.mime_type))
    }
}
