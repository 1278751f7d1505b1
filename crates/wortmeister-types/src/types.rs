use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entry::WordEntry;

#[derive(Debug, Clone)]
pub enum AppEvent {
    // UI -> app
    Analyze { word: String, level: Level },
    Speak(String),
    RemoveWord(String),
    Quit,

    // app -> UI
    Snapshot { history: Vec<WordEntry>, xp: u64 },
    AnalysisReady(WordEntry),
    AnalysisFailed { word: String },
    SpeechFinished { text: String, outcome: SpeechOutcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechOutcome {
    /// Model audio was played
    Played,
    /// On-device synthesizer was used
    Fallback,
    /// Neither source could speak
    Unavailable,
}

/// Parsed user command from the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Navigate(View),
    Analyze(String),
    Study(String),
    Delete(String),
    Search(String),
    Say(Option<String>),
    SayExample,
    SetLevel(Level),
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Analyzer,
    Library,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Analyzer => "analyzer",
            View::Library => "library",
        }
    }
}

/// CEFR proficiency tag sent along with every prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Level {
    #[default]
    A1,
    B1,
    C1,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::A1, Level::B1, Level::C1];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::B1 => "B1",
            Level::C1 => "C1",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Level::A1 => "A1 (Beginner)",
            Level::B1 => "B1 (Intermediate)",
            Level::C1 => "C1 (Advanced)",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level '{0}', expected one of A1, B1, C1")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A1" => Ok(Level::A1),
            "B1" => Ok(Level::B1),
            "C1" => Ok(Level::C1),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
