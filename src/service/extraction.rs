//! Recovery of a JSON object from free-form model output
//!
//! Models asked for "only JSON" still wrap it in prose, append commentary or
//! leave a trailing comma. Extraction runs an ordered chain of strategies and
//! the first one that yields an object wins. Deeper structural damage is not
//! repaired.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

pub type JsonObject = Map<String, Value>;

static TRAILING_COMMA_OBJECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\}").unwrap());
static TRAILING_COMMA_ARRAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\]").unwrap());

/// One way of turning text into a JSON object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Parse the entire text
    WholeText,
    /// Parse from the first `{` to the last `}`
    BraceSlice,
    /// Like `BraceSlice`, after dropping commas directly before `}` or `]`
    TrailingCommaRepair,
}

impl ExtractionStrategy {
    /// Strategies in the order they are attempted
    pub const CHAIN: [ExtractionStrategy; 3] = [
        ExtractionStrategy::WholeText,
        ExtractionStrategy::BraceSlice,
        ExtractionStrategy::TrailingCommaRepair,
    ];

    pub fn apply(self, text: &str) -> Option<JsonObject> {
        match self {
            ExtractionStrategy::WholeText => parse_object(text),
            ExtractionStrategy::BraceSlice => brace_slice(text).and_then(parse_object),
            ExtractionStrategy::TrailingCommaRepair => {
                brace_slice(text).and_then(|block| parse_object(&strip_trailing_commas(block)))
            }
        }
    }
}

/// Recover the first well-formed JSON object from `text`.
///
/// Returns `None` when no strategy succeeds; that is an ordinary outcome.
pub fn extract_json(text: &str) -> Option<JsonObject> {
    ExtractionStrategy::CHAIN.iter().find_map(|strategy| {
        let found = strategy.apply(text);
        if found.is_some() {
            tracing::trace!(strategy = ?strategy, "Recovered JSON object");
        }
        found
    })
}

fn parse_object(text: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Slice from the first `{` through the last `}`, if they appear in that order
fn brace_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn strip_trailing_commas(block: &str) -> String {
    let without_object_commas = TRAILING_COMMA_OBJECT_RE.replace_all(block, "}");
    TRAILING_COMMA_ARRAY_RE
        .replace_all(&without_object_commas, "]")
        .into_owned()
}
