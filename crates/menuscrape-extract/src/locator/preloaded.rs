use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{Embedding, Page};

static ASSIGNMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"window\.__PRELOADED_STATE__\s*=\s*").expect("valid regex")
});

static JSON_PARSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^JSON\.parse\(\s*").expect("valid regex"));

/// `window.__PRELOADED_STATE__ = JSON.parse("…")` or `= { … }` in an inline script.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreloadedState;

impl Embedding for PreloadedState {
    fn name(&self) -> &'static str {
        "preloaded_state"
    }

    fn candidates(&self, page: &Page<'_>) -> Vec<Result<Value, String>> {
        let html = page.html();
        ASSIGNMENT_RE
            .find_iter(html)
            .map(|m| decode_assignment(&html[m.end()..]))
            .collect()
    }
}

/// Decode the right-hand side of the state assignment.
fn decode_assignment(rhs: &str) -> Result<Value, String> {
    if let Some(m) = JSON_PARSE_RE.find(rhs) {
        let literal = first_value(&rhs[m.end()..])?;
        let Value::String(inner) = literal else {
            return Err("JSON.parse argument is not a string literal".to_owned());
        };
        return serde_json::from_str(&inner).map_err(|e| format!("inner JSON: {e}"));
    }
    first_value(rhs)
}

/// Read one JSON value from the start of `text`, ignoring whatever follows it.
fn first_value(text: &str) -> Result<Value, String> {
    serde_json::Deserializer::from_str(text)
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| "empty assignment".to_owned())?
        .map_err(|e| e.to_string())
}
