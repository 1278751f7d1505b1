use std::io::{BufRead, Write};

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use wortmeister_core::ShellState;
use wortmeister_types::{AppEvent, Level, SpeechOutcome, UiEvent, View};

use crate::render::{render, render_help};

const ANALYSIS_FAILED: &str = "Error: could not analyze that word.";

/// Parse one input line. Bare text in the analyzer is a lookup.
pub fn parse_command(line: &str, view: View) -> Result<Option<UiEvent>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let event = match head.to_lowercase().as_str() {
        "dashboard" | "home" => UiEvent::Navigate(View::Dashboard),
        "analyzer" => UiEvent::Navigate(View::Analyzer),
        "library" => UiEvent::Navigate(View::Library),
        "analyze" => UiEvent::Analyze(required(rest, "analyze <word>")?),
        "study" => UiEvent::Study(required(rest, "study <word|#>")?),
        "delete" | "remove" => UiEvent::Delete(required(rest, "delete <word|#>")?),
        "search" => UiEvent::Search(rest.to_string()),
        "say" => UiEvent::Say((!rest.is_empty()).then(|| rest.to_string())),
        "example" => UiEvent::SayExample,
        "level" => UiEvent::SetLevel(rest.parse::<Level>().map_err(|e| e.to_string())?),
        "help" | "?" => UiEvent::Help,
        "quit" | "exit" => UiEvent::Quit,
        _ if view == View::Analyzer => UiEvent::Analyze(line.to_string()),
        _ => return Err(format!("Unknown command '{head}'. Type `help`.")),
    };

    Ok(Some(event))
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        return Err(format!("Usage: {usage}"));
    }
    Ok(rest.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal front end: turns input lines into app events and app events
/// into text
pub struct Terminal {
    shell: ShellState,
    ui_to_app_tx: AsyncSender<AppEvent>,
}

impl Terminal {
    pub fn new(level: Level, ui_to_app_tx: AsyncSender<AppEvent>) -> Self {
        Self {
            shell: ShellState::new(level),
            ui_to_app_tx,
        }
    }

    pub fn shell(&self) -> &ShellState {
        &self.shell
    }

    /// Nothing in flight
    pub fn is_idle(&self) -> bool {
        !self.shell.is_analyzing() && !self.shell.is_speaking()
    }

    pub fn prompt(&self) -> String {
        format!("{}> ", self.shell.view().as_str())
    }

    pub async fn handle_line(&mut self, line: &str) -> anyhow::Result<(Flow, String)> {
        let event = match parse_command(line, self.shell.view()) {
            Ok(Some(event)) => event,
            Ok(None) => return Ok((Flow::Continue, String::new())),
            Err(message) => return Ok((Flow::Continue, message)),
        };

        tracing::debug!("UI event: {:?}", event);

        let output = match event {
            UiEvent::Navigate(view) => {
                self.shell.navigate(view);
                if view == View::Analyzer {
                    self.start_pending_study().await?;
                }
                render(&self.shell)
            }
            UiEvent::Analyze(query) => {
                self.shell.navigate(View::Analyzer);
                self.analyze(&query).await?
            }
            UiEvent::Study(selector) => match self.shell.resolve_word(&selector) {
                Some(word) => {
                    self.shell.study(&word);
                    self.start_pending_study().await?;
                    render(&self.shell)
                }
                None => format!("No saved word '{selector}'"),
            },
            UiEvent::Delete(selector) => match self.shell.resolve_word(&selector) {
                Some(word) => {
                    self.ui_to_app_tx
                        .send(AppEvent::RemoveWord(word.clone()))
                        .await?;
                    format!("Removed '{word}'")
                }
                None => format!("No saved word '{selector}'"),
            },
            UiEvent::Search(filter) => {
                self.shell.navigate(View::Library);
                self.shell.set_filter(&filter);
                render(&self.shell)
            }
            UiEvent::Say(text) => {
                let text = text.or_else(|| self.shell.current().map(|e| e.word.clone()));
                self.speak(text.as_deref().unwrap_or_default()).await?
            }
            UiEvent::SayExample => {
                let text = self
                    .shell
                    .current()
                    .map(|e| e.example_sentence.german.clone())
                    .unwrap_or_default();
                self.speak(&text).await?
            }
            UiEvent::SetLevel(level) => {
                self.shell.set_level(level);
                format!("Level set to {}", level.description())
            }
            UiEvent::Help => render_help(),
            UiEvent::Quit => {
                if let Err(e) = self.ui_to_app_tx.send(AppEvent::Quit).await {
                    tracing::debug!("App already stopped: {}", e);
                }
                return Ok((Flow::Quit, String::new()));
            }
        };

        Ok((Flow::Continue, output))
    }

    pub fn handle_app_event(&mut self, event: AppEvent) -> Option<String> {
        match event {
            AppEvent::Snapshot { history, xp } => {
                self.shell.sync(history, xp);
                matches!(self.shell.view(), View::Dashboard | View::Library)
                    .then(|| render(&self.shell))
            }
            AppEvent::AnalysisReady(entry) => {
                let word = entry.word.clone();
                self.shell.finish_analysis(entry);
                if self.shell.view() == View::Analyzer {
                    Some(render(&self.shell))
                } else {
                    Some(format!("Saved '{word}'"))
                }
            }
            AppEvent::AnalysisFailed { word } => {
                tracing::debug!("Analysis of '{}' failed", word);
                self.shell.fail_analysis();
                Some(ANALYSIS_FAILED.to_string())
            }
            AppEvent::SpeechFinished { text, outcome } => {
                self.shell.finish_speech();
                match outcome {
                    SpeechOutcome::Played | SpeechOutcome::Fallback => {
                        tracing::debug!("Spoke '{}' ({:?})", text, outcome);
                        None
                    }
                    SpeechOutcome::Unavailable => Some("Audio unavailable".to_string()),
                }
            }
            AppEvent::Analyze { .. }
            | AppEvent::Speak(_)
            | AppEvent::RemoveWord(_)
            | AppEvent::Quit => None,
        }
    }

    async fn analyze(&mut self, query: &str) -> anyhow::Result<String> {
        let Some(word) = self.shell.begin_analysis(query) else {
            return Ok("Nothing to analyze".to_string());
        };

        self.ui_to_app_tx
            .send(AppEvent::Analyze {
                word,
                level: self.shell.level(),
            })
            .await?;

        Ok(render(&self.shell))
    }

    async fn start_pending_study(&mut self) -> anyhow::Result<()> {
        if let Some(word) = self.shell.take_active_word() {
            self.analyze(&word).await?;
        }
        Ok(())
    }

    async fn speak(&mut self, text: &str) -> anyhow::Result<String> {
        if text.trim().is_empty() {
            return Ok("Nothing to say".to_string());
        }

        let Some(text) = self.shell.begin_speech(text) else {
            return Ok("Audio is still playing".to_string());
        };

        let output = format!("🔊 {text}");
        self.ui_to_app_tx.send(AppEvent::Speak(text)).await?;
        Ok(output)
    }
}

/// Read stdin on a plain thread; a blocked read never holds up runtime shutdown
fn spawn_stdin_reader() -> AsyncReceiver<String> {
    let (tx, rx) = kanal::bounded::<String>(16);

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
        tracing::debug!("[UI] stdin closed");
    });

    rx.to_async()
}

fn print_output(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}

fn print_prompt(terminal: &Terminal, interactive: bool) {
    if interactive {
        print!("{}", terminal.prompt());
        let _ = std::io::stdout().flush();
    }
}

pub async fn ui_loop(
    level: Level,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    let lines = spawn_stdin_reader();
    let mut terminal = Terminal::new(level, ui_to_app_tx.clone());
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("[UI] Cancelled");
                break;
            }
            event = app_to_ui_rx.recv() => {
                let Ok(event) = event else {
                    tracing::debug!("[UI] App channel closed");
                    break;
                };

                if let Some(output) = terminal.handle_app_event(event) {
                    println!("{output}");
                    print_prompt(&terminal, interactive && stdin_open);
                }

                // piped input: quit once the last request has settled
                if !stdin_open && terminal.is_idle() {
                    terminal.handle_line("quit").await?;
                    break;
                }
            }
            line = lines.recv(), if stdin_open => {
                match line {
                    Ok(line) => {
                        let (flow, output) = terminal.handle_line(&line).await?;
                        print_output(&output);
                        if flow == Flow::Quit {
                            break;
                        }
                        print_prompt(&terminal, interactive);
                    }
                    Err(_) => {
                        stdin_open = false;
                        if terminal.is_idle() {
                            terminal.handle_line("quit").await?;
                            break;
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
