use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use wortmeister_config::Config;
use wortmeister_gemini::{Transport, TransportError};
use wortmeister_types::WordEntry;

use crate::state::AppState;

struct Reply {
    word: String,
    answer: Result<String, u16>,
    delay: Duration,
}

/// Fake Gemini that answers by the word found in the request, so concurrent
/// requests get the right reply whatever order they arrive in
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Vec<Reply>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests about `word` with `model_text` as the model's output
    pub fn answer(self, word: &str, model_text: &str) -> Self {
        self.answer_after(word, model_text, Duration::ZERO)
    }

    pub fn answer_after(mut self, word: &str, model_text: &str, delay: Duration) -> Self {
        self.replies.push(Reply {
            word: word.to_string(),
            answer: Ok(gemini_text(model_text)),
            delay,
        });
        self
    }

    /// Answer requests about `word` with a raw response body
    pub fn raw(mut self, word: &str, body: Value) -> Self {
        self.replies.push(Reply {
            word: word.to_string(),
            answer: Ok(body.to_string()),
            delay: Duration::ZERO,
        });
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(
        &self,
        _url: &str,
        _api_key: &str,
        body: String,
    ) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let request: Value = serde_json::from_str(&body).unwrap();
        let text = request["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        let reply = self
            .replies
            .iter()
            .find(|r| text == r.word || text.contains(&format!("\"{}\"", r.word)));

        let Some(reply) = reply else {
            return Err(TransportError::Status {
                status: 404,
                body: format!("no scripted reply for {text:?}"),
            });
        };

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }

        reply.answer.clone().map_err(|status| TransportError::Status {
            status,
            body: String::new(),
        })
    }
}

/// A generateContent response carrying `text` as the first part
pub fn gemini_text(text: &str) -> String {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }).to_string()
}

/// Fenced model answer for `word`, the way the model tends to reply
pub fn fenced_entry(word: &str, gender: &str, translation: &str) -> String {
    let entry = json!({
        "word": word,
        "gender": gender,
        "translation": translation,
        "definition": "",
        "ipa": "",
        "partOfSpeech": "noun",
        "grammar": { "plural": "" },
        "exampleSentence": { "german": format!("Das ist {gender} {word}."), "translation": "" }
    });
    format!("```json\n{entry}\n```")
}

pub fn entry(word: &str) -> WordEntry {
    WordEntry {
        word: word.to_string(),
        translation: format!("{}-en", word.to_lowercase()),
        ..Default::default()
    }
}

pub fn test_config(api_key: Option<&str>, data_dir: &Path) -> Config {
    let mut config = Config::default();
    config.gemini.api_key = api_key.map(str::to_string);
    config.gemini.base_url = "http://gemini.test/v1beta".to_string();
    config.storage.data_dir = data_dir.to_path_buf();
    config.audio.player = "true".to_string();
    config.audio.fallback_tts = "true".to_string();
    config
}

pub fn test_state(
    transport: Arc<ScriptedTransport>,
    api_key: Option<&str>,
    data_dir: &Path,
) -> Arc<AppState> {
    Arc::new(AppState::with_transport(
        test_config(api_key, data_dir),
        transport,
    ))
}
