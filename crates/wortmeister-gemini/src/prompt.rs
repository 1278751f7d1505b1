use wortmeister_types::Level;

/// Shape the model is asked to fill in; field names match `WordEntry`
const ENTRY_SCHEMA: &str = r#"{"word": "BaseLemma", "gender": "der/die/das", "translation": "en", "definition": "def", "ipa": "ipa", "partOfSpeech": "type", "grammar": {"plural": "pl"}, "exampleSentence": {"german": "ex", "translation": "en"}}"#;

/// Appended to every prompt that expects structured output
pub const JSON_DIRECTIVE: &str = " \nReturn ONLY valid JSON. No markdown.";

/// Instruction for analyzing one German word at a learner level
pub fn analysis_prompt(word: &str, level: Level) -> String {
    format!(
        "Analyze German word \"{}\". Level {}. Return JSON: {}",
        word.replace('"', "'"),
        level,
        ENTRY_SCHEMA
    )
}
