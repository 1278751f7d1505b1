use kanal::AsyncSender;
use wortmeister_core::LearnerStore;
use wortmeister_types::AppEvent;

use crate::events::send_snapshot;

pub async fn handle_removal(
    store: &mut LearnerStore,
    word: &str,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match store.history.remove(word) {
        Ok(true) => tracing::info!("Removed '{}' from library", word),
        Ok(false) => tracing::debug!("'{}' not in library", word),
        Err(e) => tracing::error!("Failed to persist removal of '{}': {}", word, e),
    }

    send_snapshot(store, app_to_ui_tx).await
}
