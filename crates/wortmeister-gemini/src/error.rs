use wortmeister_core::ExtractError;
use wortmeister_types::SchemaError;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Missing API key")]
    Config,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid JSON format from model: {0}")]
    Parse(#[from] ExtractError),

    #[error("Unexpected analysis shape: {0}")]
    Schema(#[from] SchemaError),
}

/// Reasons a speech request produced no audio. Never leaves the speech client.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Missing API key")]
    Config,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid base64 audio: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Empty audio payload")]
    Empty,
}
