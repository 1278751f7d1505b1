//! Pulling a JSON value out of free-form model output.
//!
//! Models wrap answers in code fences, prepend prose, or append remarks.
//! Extraction tries the whole text first, then every `{` start left to right,
//! then every `[` start, decoding the balanced span that follows each one.

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no JSON object or array in model output")]
    NoJson,

    #[error("model output contains brackets but no decodable JSON")]
    Malformed,
}

/// Remove markdown code fence markers and surrounding whitespace
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Extract the first JSON object or array from noisy text
pub fn extract_json(text: &str) -> Result<Value, ExtractError> {
    let text = text.trim();

    if let Ok(value @ (Value::Object(_) | Value::Array(_))) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }

    if let Some(value) = first_balanced(text, b'{').or_else(|| first_balanced(text, b'[')) {
        return Ok(value);
    }

    if text.contains(['{', '[']) {
        Err(ExtractError::Malformed)
    } else {
        Err(ExtractError::NoJson)
    }
}

fn first_balanced(text: &str, open: u8) -> Option<Value> {
    let bytes = text.as_bytes();

    bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == open)
        .find_map(|(start, _)| {
            let end = balanced_end(bytes, start)?;
            // Delimiters are ASCII, so both ends sit on char boundaries
            serde_json::from_str(&text[start..=end]).ok()
        })
}

/// Index of the bracket closing the one at `start`, skipping string literals
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}
