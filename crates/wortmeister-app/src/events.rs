use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use wortmeister_core::{LearnerStore, RequestSequence};
use wortmeister_types::AppEvent;

use crate::state::AppState;

pub mod analyze;
pub mod remove;
pub mod speak;

use analyze::{AnalysisOutcome, handle_analysis_outcome, spawn_analysis};
use remove::handle_removal;
use speak::spawn_speech;

/// App's main loop. Sole owner of history and score.
pub async fn event_loop(
    state: Arc<AppState>,
    mut store: LearnerStore,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (done_tx, done_rx) = kanal::bounded_async::<AnalysisOutcome>(16);
    let mut sequence = RequestSequence::new();

    send_snapshot(&store, &app_to_ui_tx).await?;

    tracing::debug!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => {
                let Ok(event) = event else {
                    tracing::debug!("[EVENT_LOOP] UI channel closed");
                    break;
                };

                if matches!(event, AppEvent::Quit) {
                    cancel.cancel();
                    break;
                }

                handle_events(
                    &state,
                    &mut store,
                    &mut sequence,
                    &done_tx,
                    &app_to_ui_tx,
                    event,
                )
                .await?;
            }
            outcome = done_rx.recv() => {
                let outcome = outcome?;
                handle_analysis_outcome(&mut store, &sequence, outcome, &app_to_ui_tx).await?;
            }
        }
    }

    Ok(())
}

async fn handle_events(
    state: &Arc<AppState>,
    store: &mut LearnerStore,
    sequence: &mut RequestSequence,
    done_tx: &AsyncSender<AnalysisOutcome>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Analyze { word, level } => {
            let seq = sequence.issue();
            tracing::info!("Analyzing '{}' at {} (request #{})", word, level, seq);

            spawn_analysis(state.clone(), seq, word, level, done_tx.clone());
        }
        AppEvent::Speak(text) => {
            tracing::info!("Speaking {} chars", text.chars().count());

            spawn_speech(state.clone(), text, app_to_ui_tx.clone());
        }
        AppEvent::RemoveWord(word) => {
            handle_removal(store, &word, app_to_ui_tx).await?;
        }
        AppEvent::Quit => {}
        AppEvent::Snapshot { .. }
        | AppEvent::AnalysisReady(_)
        | AppEvent::AnalysisFailed { .. }
        | AppEvent::SpeechFinished { .. } => {
            // UI-only events, ignore in backend
        }
    }

    Ok(())
}

/// Push the current history and score to the UI
pub async fn send_snapshot(
    store: &LearnerStore,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    app_to_ui_tx
        .send(AppEvent::Snapshot {
            history: store.history.get().to_vec(),
            xp: store.experience.get(),
        })
        .await?;
    Ok(())
}
