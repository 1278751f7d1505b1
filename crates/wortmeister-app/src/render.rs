use std::fmt::Write as _;

use wortmeister_core::ShellState;
use wortmeister_core::store::HISTORY_LIMIT;
use wortmeister_types::{View, WordEntry};

pub fn render(shell: &ShellState) -> String {
    match shell.view() {
        View::Dashboard => render_dashboard(shell),
        View::Analyzer => render_analyzer(shell),
        View::Library => render_library(shell),
    }
}

pub fn render_header(shell: &ShellState) -> String {
    format!(
        "WortMeister · {} · {} XP",
        shell.level().description(),
        shell.xp()
    )
}

pub fn render_dashboard(shell: &ShellState) -> String {
    let mut out = render_header(shell);
    out.push_str("\n\n");
    out.push_str("  analyzer   Look up a German word\n");
    let _ = writeln!(
        out,
        "  library    Your saved words ({}/{})",
        shell.history().len(),
        HISTORY_LIMIT
    );
    out.push_str("\nType `help` for all commands.");
    out
}

pub fn render_analyzer(shell: &ShellState) -> String {
    let mut out = String::from("Analyzer · type a word to look it up");

    if shell.is_analyzing() {
        let _ = write!(out, "\n\n… analyzing \"{}\"", shell.query());
    } else if let Some(entry) = shell.current() {
        out.push_str("\n\n");
        out.push_str(&render_entry(entry));
    }

    out
}

pub fn render_library(shell: &ShellState) -> String {
    let entries = shell.library();
    let mut out = format!("Library ({})", shell.history().len());
    if !shell.filter().is_empty() {
        let _ = write!(out, " · matching \"{}\"", shell.filter());
    }
    out.push('\n');

    if entries.is_empty() {
        out.push_str("\n  (no words)");
        return out;
    }

    for (i, entry) in entries.iter().enumerate() {
        let _ = write!(out, "\n{:>3}. {}", i + 1, entry.headword());
        if !entry.translation.is_empty() {
            let _ = write!(out, " — {}", entry.translation);
        }
    }

    out
}

/// Full card for one analyzed word
pub fn render_entry(entry: &WordEntry) -> String {
    let mut out = entry.word.clone();

    let details: Vec<&str> = [
        entry.gender.as_deref().unwrap_or_default(),
        entry.part_of_speech.as_str(),
        entry.ipa.as_str(),
    ]
    .into_iter()
    .filter(|d| !d.is_empty())
    .collect();
    if !details.is_empty() {
        let _ = write!(out, "\n{}", details.join(" • "));
    }

    if !entry.translation.is_empty() {
        let _ = write!(out, "\n\n  {}", entry.translation);
    }
    if !entry.definition.is_empty() {
        let _ = write!(out, "\n  {}", entry.definition);
    }
    if !entry.grammar.plural.is_empty() {
        let _ = write!(out, "\n  Plural: {}", entry.grammar.plural);
    }

    let example = &entry.example_sentence;
    if !example.german.is_empty() {
        let _ = write!(out, "\n\n  \"{}\"", example.german);
        if !example.translation.is_empty() {
            let _ = write!(out, "\n  {}", example.translation);
        }
    }

    out
}

pub fn render_help() -> String {
    [
        "Commands:",
        "  dashboard | analyzer | library   switch view",
        "  analyze <word>                   look up a word (bare text works in the analyzer)",
        "  study <word|#>                   open a saved word in the analyzer",
        "  delete <word|#>                  remove a saved word",
        "  search <text>                    filter the library",
        "  say [text]                       pronounce text, or the current word",
        "  example                          pronounce the current example sentence",
        "  level <A1|B1|C1>                 change learner level",
        "  help | quit",
    ]
    .join("\n")
}
