//! Presentation shell state: which view is showing and what it shows.
//!
//! Only ephemeral UI state lives here. History and score arrive as
//! snapshots from the event loop, which is their only writer.

use wortmeister_types::{Level, View, WordEntry};

use crate::preprocess::{Preprocessor, QueryPreprocessor};
use crate::store::filter_entries;

#[derive(Debug, Default)]
pub struct ShellState {
    view: View,
    level: Level,
    query: String,
    /// Word handed from the library to the analyzer, looked up once
    active_word: Option<String>,
    current: Option<WordEntry>,
    history: Vec<WordEntry>,
    xp: u64,
    filter: String,
    analyzing: bool,
    speaking: bool,
}

impl ShellState {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current(&self) -> Option<&WordEntry> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &[WordEntry] {
        &self.history
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    /// Switch views. Entering a view starts it fresh.
    pub fn navigate(&mut self, view: View) {
        if view == self.view {
            return;
        }

        match view {
            View::Analyzer => {
                self.query.clear();
                self.current = None;
            }
            View::Library => self.filter.clear(),
            View::Dashboard => {}
        }

        tracing::debug!("View {} -> {}", self.view.as_str(), view.as_str());
        self.view = view;
    }

    /// Open `word` in the analyzer; the analyzer looks it up on entry
    pub fn study(&mut self, word: &str) {
        self.navigate(View::Analyzer);
        self.query = word.to_string();
        self.active_word = Some(word.to_string());
    }

    /// Consume the pending study word, if any
    pub fn take_active_word(&mut self) -> Option<String> {
        self.active_word.take()
    }

    /// Start a lookup for `query`. Returns the word to analyze, or `None`
    /// for a blank query.
    pub fn begin_analysis(&mut self, query: &str) -> Option<String> {
        let word = QueryPreprocessor.process(query);
        if word.is_empty() {
            return None;
        }

        if self.analyzing {
            tracing::debug!("Superseding in-flight analysis with '{}'", word);
        }

        self.query = word.clone();
        self.analyzing = true;
        Some(word)
    }

    pub fn finish_analysis(&mut self, entry: WordEntry) {
        self.analyzing = false;
        self.current = Some(entry);
    }

    pub fn fail_analysis(&mut self) {
        self.analyzing = false;
    }

    /// Mirror the persisted history and score
    pub fn sync(&mut self, history: Vec<WordEntry>, xp: u64) {
        self.history = history;
        self.xp = xp;
    }

    /// Start speaking `text`. `None` when there is nothing to say or audio is
    /// already in flight.
    pub fn begin_speech(&mut self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() || self.speaking {
            return None;
        }

        self.speaking = true;
        Some(text.to_string())
    }

    pub fn finish_speech(&mut self) {
        self.speaking = false;
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.trim().to_string();
    }

    /// History entries matching the library filter
    pub fn library(&self) -> Vec<&WordEntry> {
        filter_entries(&self.history, &self.filter)
    }

    /// Resolve a library selector: a 1-based row number in the filtered
    /// library, or a saved word spelled exactly
    pub fn resolve_word(&self, selector: &str) -> Option<String> {
        let selector = selector.trim();

        if let Ok(row) = selector.parse::<usize>() {
            return row
                .checked_sub(1)
                .and_then(|index| self.library().get(index).map(|e| e.word.clone()));
        }

        self.history
            .iter()
            .find(|e| e.word == selector)
            .map(|e| e.word.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, translation: &str) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            translation: translation.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_on_dashboard() {
        let shell = ShellState::new(Level::B1);
        assert_eq!(shell.view(), View::Dashboard);
        assert_eq!(shell.level(), Level::B1);
        assert!(!shell.is_analyzing());
    }

    #[test]
    fn test_reentering_analyzer_does_not_restore_state() {
        let mut shell = ShellState::new(Level::A1);
        shell.navigate(View::Analyzer);
        shell.begin_analysis("Haus").unwrap();
        shell.finish_analysis(entry("Haus", "house"));
        assert!(shell.current().is_some());

        shell.navigate(View::Dashboard);
        shell.navigate(View::Analyzer);
        assert!(shell.current().is_none());
        assert_eq!(shell.query(), "");
    }

    #[test]
    fn test_study_passes_word_once() {
        let mut shell = ShellState::new(Level::A1);
        shell.navigate(View::Library);
        shell.study("Baum");

        assert_eq!(shell.view(), View::Analyzer);
        assert_eq!(shell.query(), "Baum");
        assert_eq!(shell.take_active_word().as_deref(), Some("Baum"));
        assert_eq!(shell.take_active_word(), None);
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let mut shell = ShellState::new(Level::A1);
        assert_eq!(shell.begin_analysis("   "), None);
        assert!(!shell.is_analyzing());

        assert_eq!(shell.begin_analysis("  Haus ").as_deref(), Some("Haus"));
        assert!(shell.is_analyzing());

        shell.fail_analysis();
        assert!(!shell.is_analyzing());
        assert!(shell.current().is_none());
    }

    #[test]
    fn test_speech_is_single_flight() {
        let mut shell = ShellState::new(Level::A1);
        assert_eq!(shell.begin_speech(""), None);
        assert_eq!(shell.begin_speech("Haus").as_deref(), Some("Haus"));
        assert_eq!(shell.begin_speech("Baum"), None);

        shell.finish_speech();
        assert_eq!(shell.begin_speech("Baum").as_deref(), Some("Baum"));
    }

    #[test]
    fn test_library_filter_and_selectors() {
        let mut shell = ShellState::new(Level::A1);
        shell.sync(
            vec![
                entry("Hund", "dog"),
                entry("Baum", "tree"),
                entry("Haus", "house"),
            ],
            30,
        );
        shell.navigate(View::Library);

        assert_eq!(shell.library().len(), 3);
        assert_eq!(shell.resolve_word("2").as_deref(), Some("Baum"));

        shell.set_filter("ho");
        let words: Vec<&str> = shell.library().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["Haus"]);
        assert_eq!(shell.resolve_word("1").as_deref(), Some("Haus"));
        assert_eq!(shell.resolve_word("2"), None);
        assert_eq!(shell.resolve_word("0"), None);

        assert_eq!(shell.resolve_word("Hund").as_deref(), Some("Hund"));
        assert_eq!(shell.resolve_word("hund"), None);
    }

    #[test]
    fn test_entering_library_clears_filter() {
        let mut shell = ShellState::new(Level::A1);
        shell.navigate(View::Library);
        shell.set_filter("x");
        shell.navigate(View::Dashboard);
        shell.navigate(View::Library);
        assert_eq!(shell.filter(), "");
    }
}
