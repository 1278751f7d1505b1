use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default German query preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Composed umlauts, so "Mädchen" typed as a + U+0308 matches the precomposed form
        let text: String = text.nfc().collect();

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct QueryPreprocessor;
impl Preprocessor for QueryPreprocessor {}
