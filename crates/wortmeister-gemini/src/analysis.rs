use std::sync::Arc;

use serde_json::Value;
use wortmeister_config::gemini::GeminiConfig;
use wortmeister_core::{extract_json, strip_code_fences};
use wortmeister_types::{Level, WordEntry};

use crate::error::AnalysisError;
use crate::prompt::{JSON_DIRECTIVE, analysis_prompt};
use crate::transport::{ReqwestTransport, Transport};
use crate::wire::{GenerateRequest, GenerateResponse};

/// Word analysis through the text generation endpoint
#[derive(Clone)]
pub struct AnalysisClient {
    transport: Arc<dyn Transport>,
    api_key: Option<String>,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(config: &GeminiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            api_key: config.api_key.clone(),
            endpoint: config.text_endpoint(),
        }
    }

    /// Ask the model for a structured analysis of `word`
    pub async fn analyze(&self, word: &str, level: Level) -> Result<WordEntry, AnalysisError> {
        let value = self.generate_json(&analysis_prompt(word, level)).await?;
        let entry = WordEntry::from_model(value, word)?;

        tracing::debug!("Analyzed '{}' as '{}'", word, entry.word);
        Ok(entry)
    }

    /// Send a prompt that expects JSON back and extract it from the answer
    pub async fn generate_json(&self, prompt: &str) -> Result<Value, AnalysisError> {
        let text = self.generate_text(&format!("{prompt}{JSON_DIRECTIVE}")).await?;
        let clean = strip_code_fences(&text);

        extract_json(&clean).map_err(|e| {
            tracing::debug!("Unparseable model answer: {:?}", clean);
            AnalysisError::Parse(e)
        })
    }

    /// Send a prompt and return the first text part of the first candidate
    pub async fn generate_text(&self, prompt: &str) -> Result<String, AnalysisError> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(AnalysisError::Config),
        };

        let body = serde_json::to_string(&GenerateRequest::text(prompt))
            .map_err(|e| AnalysisError::Decode(format!("Failed to encode request: {e}")))?;

        let raw = self
            .transport
            .post_json(&self.endpoint, api_key, body)
            .await?;

        let response: GenerateResponse = serde_json::from_str(&raw)
            .map_err(|e| AnalysisError::Decode(format!("Failed to parse response: {e}")))?;

        response
            .into_first_part()
            .and_then(|part| part.text)
            .ok_or_else(|| AnalysisError::Decode("No text in response".to_string()))
    }
}
