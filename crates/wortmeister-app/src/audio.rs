use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, bail};
use tokio::process::Command;
use wortmeister_config::Config;
use wortmeister_config::audio::AudioConfig;
use wortmeister_gemini::AudioClip;

const CLIP_FILE: &str = "last.wav";

/// Write the clip as a WAV file and hand it to the configured player
pub async fn play_clip(config: &Config, clip: &AudioClip) -> anyhow::Result<PathBuf> {
    let dir = config.storage.audio_dir();
    tokio::fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(CLIP_FILE);
    tokio::fs::write(&path, clip.to_wav())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    run_command(&config.audio.player, &path.to_string_lossy()).await?;
    Ok(path)
}

/// Speak with the on-device synthesizer
pub async fn speak_on_device(config: &AudioConfig, text: &str) -> anyhow::Result<()> {
    run_command(&config.fallback_tts, text).await
}

/// Run `command_line` with `last_arg` appended, waiting for it to finish
async fn run_command(command_line: &str, last_arg: &str) -> anyhow::Result<()> {
    let mut parts = command_line.split_whitespace();
    let program = parts.next().context("Empty audio command")?;

    let status = Command::new(program)
        .args(parts)
        .arg(last_arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .with_context(|| format!("Failed to launch {program}"))?;

    if !status.success() {
        bail!("{program} exited with {status}");
    }

    Ok(())
}
