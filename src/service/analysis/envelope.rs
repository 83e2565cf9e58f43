//! Locating the model's text inside a response envelope
//!
//! Gemini nests the generated text several levels deep, and older or
//! alternative endpoints use other shapes. Locations are tried in order and
//! the first non-empty text wins.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateLocation {
    /// `candidates[0].content.parts[0].text`
    FirstPart,
    /// Every `candidates[0].content.parts[*].text`, joined by newlines
    JoinedParts,
    /// `candidates[0].content.text`
    ContentText,
    /// `output[0].content.text`
    OutputContentText,
    /// Top-level `text`
    TopLevelText,
    /// The envelope is itself a JSON string
    WholeString,
}

impl CandidateLocation {
    pub const ORDER: [CandidateLocation; 6] = [
        CandidateLocation::FirstPart,
        CandidateLocation::JoinedParts,
        CandidateLocation::ContentText,
        CandidateLocation::OutputContentText,
        CandidateLocation::TopLevelText,
        CandidateLocation::WholeString,
    ];

    pub fn read(self, envelope: &Value) -> Option<String> {
        let text = match self {
            CandidateLocation::FirstPart => pointer_str(envelope, "/candidates/0/content/parts/0/text"),
            CandidateLocation::JoinedParts => envelope
                .pointer("/candidates/0/content/parts")
                .and_then(Value::as_array)
                .map(|parts| {
                    parts
                        .iter()
                        .map(|p| p.get("text").and_then(Value::as_str).unwrap_or_default())
                        .collect::<Vec<_>>()
                        .join("\n")
                }),
            CandidateLocation::ContentText => pointer_str(envelope, "/candidates/0/content/text"),
            CandidateLocation::OutputContentText => pointer_str(envelope, "/output/0/content/text"),
            CandidateLocation::TopLevelText => pointer_str(envelope, "/text"),
            CandidateLocation::WholeString => envelope.as_str().map(str::to_string),
        };

        text.filter(|t| !t.is_empty())
    }
}

fn pointer_str(envelope: &Value, pointer: &str) -> Option<String> {
    envelope
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// First non-empty text found in the envelope
pub fn candidate_text(envelope: &Value) -> Option<String> {
    CandidateLocation::ORDER
        .iter()
        .find_map(|location| location.read(envelope))
}
