use std::sync::Arc;

use wortmeister_config::Config;
use wortmeister_gemini::{AnalysisClient, ReqwestTransport, SpeechClient, Transport};

pub struct AppState {
    pub config: Config,
    pub analysis: AnalysisClient,
    pub speech: SpeechClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Both clients share one transport (and its connection pool)
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        if config.gemini.api_key.is_none() {
            tracing::warn!("No GEMINI_API_KEY set: analysis will fail, speech falls back to on-device");
        }

        Self {
            analysis: AnalysisClient::with_transport(&config.gemini, transport.clone()),
            speech: SpeechClient::with_transport(&config.gemini, transport),
            config,
        }
    }
}
