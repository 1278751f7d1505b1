use std::sync::Arc;

use kanal::AsyncSender;
use wortmeister_types::{AppEvent, SpeechOutcome};

use crate::audio;
use crate::state::AppState;

pub fn spawn_speech(state: Arc<AppState>, text: String, app_to_ui_tx: AsyncSender<AppEvent>) {
    tokio::spawn(async move {
        let outcome = speak(&state, &text).await;

        if let Err(e) = app_to_ui_tx
            .send(AppEvent::SpeechFinished { text, outcome })
            .await
        {
            tracing::error!("Failed to report speech result: {}", e);
        }
    });
}

/// Model audio first, on-device synthesizer otherwise
pub async fn speak(state: &AppState, text: &str) -> SpeechOutcome {
    if let Some(clip) = state.speech.synthesize(text).await {
        match audio::play_clip(&state.config, &clip).await {
            Ok(path) => {
                tracing::debug!("Played {}", path.display());
                return SpeechOutcome::Played;
            }
            Err(e) => tracing::warn!("Audio playback failed: {:#}", e),
        }
    }

    match audio::speak_on_device(&state.config.audio, text).await {
        Ok(()) => SpeechOutcome::Fallback,
        Err(e) => {
            tracing::warn!("On-device speech failed: {:#}", e);
            SpeechOutcome::Unavailable
        }
    }
}
