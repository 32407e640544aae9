//! Recover a JSON object from free-form model output.
//!
//! Models tend to wrap structured answers in markdown fences or surround
//! them with prose. The fences are removed as literal text and the greedy
//! span from the first `{` to the last `}` is parsed. This is not a
//! balanced-brace scanner: two separate objects, or a stray brace in the
//! prose, produce a span that fails to parse.

use crate::error::ExtractionError;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\s*").expect("valid fence pattern"));

static BRACE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid brace pattern"));

/// Extract and parse the JSON object embedded in `text`.
pub fn extract_json(text: &str) -> Result<Value, ExtractionError> {
    let cleaned = strip_fences(text);
    let cleaned = cleaned.trim();

    let span = BRACE_SPAN.find(cleaned).ok_or(ExtractionError::NoJsonObject)?;

    Ok(serde_json::from_str(span.as_str())?)
}

fn strip_fences(text: &str) -> String {
    OPENING_FENCE.replace_all(text, "").replace("```", "")
}
