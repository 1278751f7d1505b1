pub mod entry;
pub mod types;

pub use entry::{ExampleSentence, Grammar, SchemaError, WordEntry};
pub use types::{AppEvent, Level, ParseLevelError, SpeechOutcome, UiEvent, View};
