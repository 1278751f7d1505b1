use std::sync::Arc;

use kanal::AsyncSender;
use wortmeister_core::{LearnerStore, RequestSequence};
use wortmeister_gemini::AnalysisError;
use wortmeister_types::{AppEvent, Level, WordEntry};

use crate::events::send_snapshot;
use crate::state::AppState;

/// Result of one analysis request, tagged with its sequence number
pub struct AnalysisOutcome {
    pub seq: u64,
    pub word: String,
    pub result: Result<WordEntry, AnalysisError>,
}

/// Run the analysis off the event loop; the outcome comes back on `done_tx`
pub fn spawn_analysis(
    state: Arc<AppState>,
    seq: u64,
    word: String,
    level: Level,
    done_tx: AsyncSender<AnalysisOutcome>,
) {
    tokio::spawn(async move {
        let result = state.analysis.analyze(&word, level).await;

        if let Err(e) = done_tx.send(AnalysisOutcome { seq, word, result }).await {
            tracing::error!("Failed to deliver analysis result: {}", e);
        }
    });
}

/// Apply an outcome if it belongs to the latest request
pub async fn handle_analysis_outcome(
    store: &mut LearnerStore,
    sequence: &RequestSequence,
    outcome: AnalysisOutcome,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let AnalysisOutcome { seq, word, result } = outcome;

    if !sequence.is_latest(seq) {
        tracing::debug!(
            "Discarding stale analysis of '{}' (request #{}, latest #{})",
            word,
            seq,
            sequence.latest()
        );
        return Ok(());
    }

    match result {
        Ok(entry) => {
            match store.record_analysis(entry.clone()) {
                Ok(xp) => tracing::info!("Saved '{}', {} XP", entry.word, xp),
                Err(e) => tracing::error!("Failed to persist '{}': {}", entry.word, e),
            }

            app_to_ui_tx.send(AppEvent::AnalysisReady(entry)).await?;
            send_snapshot(store, app_to_ui_tx).await?;
        }
        Err(e) => {
            tracing::error!("Analysis of '{}' failed: {}", word, e);
            app_to_ui_tx.send(AppEvent::AnalysisFailed { word }).await?;
        }
    }

    Ok(())
}
