use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Structured lexical record for one German word.
///
/// Deserialization is lenient: the model is an untrusted source, so scalar
/// fields accept numbers and booleans, `null` becomes an empty string and
/// missing sub-records become empty ones. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub word: String,
    /// Article (der/die/das); absent for non-nouns
    #[serde(default, deserialize_with = "optional_text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub translation: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub definition: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ipa: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub part_of_speech: String,
    #[serde(default, deserialize_with = "nullable")]
    pub grammar: Grammar,
    #[serde(default, deserialize_with = "nullable")]
    pub example_sentence: ExampleSentence,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    #[serde(default, deserialize_with = "lenient_string")]
    pub plural: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
    #[serde(default, deserialize_with = "lenient_string")]
    pub german: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub translation: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("array does not start with an object")]
    EmptyArray,

    #[error("invalid field: {0}")]
    InvalidField(#[from] serde_json::Error),
}

impl WordEntry {
    /// Coerce a model answer into an entry.
    ///
    /// An array is accepted when its first element is an object. A blank
    /// `word` falls back to `queried_word` so the entry keeps an identity key.
    pub fn from_model(value: Value, queried_word: &str) -> Result<Self, SchemaError> {
        let object = match value {
            Value::Object(_) => value,
            Value::Array(items) => match items.into_iter().next() {
                Some(first @ Value::Object(_)) => first,
                Some(other) => return Err(SchemaError::NotAnObject(kind(&other))),
                None => return Err(SchemaError::EmptyArray),
            },
            other => return Err(SchemaError::NotAnObject(kind(&other))),
        };

        let mut entry: WordEntry = serde_json::from_value(object)?;
        if entry.word.trim().is_empty() {
            entry.word = queried_word.to_string();
        }

        Ok(entry)
    }

    /// "das Haus", or just the word when there is no article
    pub fn headword(&self) -> String {
        match &self.gender {
            Some(gender) => format!("{} {}", gender, self.word),
            None => self.word.clone(),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Accepts strings, numbers, booleans, null and arrays of those (joined by ", ")
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(items) => {
            let parts = items
                .into_iter()
                .map(|item| {
                    scalar_text(item).ok_or_else(|| Error::custom("nested value in text list"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(parts
                .into_iter()
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>()
                .join(", "))
        }
        other => scalar_text(other).ok_or_else(|| Error::custom("expected text, found object")),
    }
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = lenient_string(deserializer)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
