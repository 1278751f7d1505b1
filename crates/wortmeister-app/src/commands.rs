use anyhow::{Context, bail};
use wortmeister_core::LearnerStore;
use wortmeister_core::preprocess::{Preprocessor, QueryPreprocessor};
use wortmeister_core::store::{HISTORY_LIMIT, XP_PER_ANALYSIS};
use wortmeister_types::{Level, SpeechOutcome, WordEntry};

use crate::cli::Command;
use crate::events::speak::speak;
use crate::render::render_entry;
use crate::state::AppState;

pub async fn run(
    command: Command,
    state: &AppState,
    mut store: LearnerStore,
    level: Level,
) -> anyhow::Result<()> {
    match command {
        Command::Analyze { word } => {
            let (entry, xp) = analyze_once(state, &mut store, &word, level).await?;
            println!(
                "{}\n\n+{} XP · {} XP total",
                render_entry(&entry),
                XP_PER_ANALYSIS,
                xp
            );
        }
        Command::Speak { text } => {
            let text = text.join(" ");
            if text.trim().is_empty() {
                tracing::debug!("Nothing to speak");
                return Ok(());
            }

            match speak(state, &text).await {
                SpeechOutcome::Played => {}
                SpeechOutcome::Fallback => tracing::info!("Used on-device speech"),
                SpeechOutcome::Unavailable => bail!("Audio unavailable"),
            }
        }
        Command::Library { search } => {
            let entries = store.history.search(search.as_deref().unwrap_or_default());
            if entries.is_empty() {
                println!("(no words)");
            }
            for (i, entry) in entries.iter().enumerate() {
                println!("{:>3}. {} — {}", i + 1, entry.headword(), entry.translation);
            }
        }
        Command::Remove { word } => {
            if !store.history.remove(&word)? {
                bail!("'{}' is not in the library", word);
            }
            println!("Removed '{word}'");
        }
        Command::Stats => {
            println!("{} XP", store.experience.get());
            println!("{}/{} words saved", store.history.len(), HISTORY_LIMIT);
        }
    }

    Ok(())
}

/// Analyze `word` and record it. Returns the entry and the new XP total.
pub async fn analyze_once(
    state: &AppState,
    store: &mut LearnerStore,
    word: &str,
    level: Level,
) -> anyhow::Result<(WordEntry, u64)> {
    let word = QueryPreprocessor.process(word);
    if word.is_empty() {
        bail!("Nothing to analyze");
    }

    let entry = state
        .analysis
        .analyze(&word, level)
        .await
        .with_context(|| format!("Failed to analyze '{word}'"))?;

    let xp = store
        .record_analysis(entry.clone())
        .context("Failed to save analyzed word")?;

    Ok((entry, xp))
}
