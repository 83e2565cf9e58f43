//! Analysis report models
//!
//! JSON field names follow the camelCase wire format served by `/api/analyze`.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Prompt;

/// Facts derived from the prompt text by the signal detectors.
///
/// Built fresh for every analysis and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalSet {
    pub has_role_or_audience: bool,
    pub has_format: bool,
    pub has_constraints: bool,
    pub has_context: bool,
    pub has_task: bool,
    pub has_example: bool,
    pub is_contradictory: bool,
    pub has_structural_cues: bool,
    /// Vocabulary entries found in the prompt, in vocabulary order
    pub vague_matches: Vec<String>,
    pub word_count: usize,
}

/// The five partial metrics behind the clarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Subscores {
    pub clarity: u32,
    pub structure: u32,
    pub specificity: u32,
    pub context: u32,
    pub constraints: u32,
}

/// Deterministic score computed from the prompt text alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    /// Aggregate score in `0..=100`
    pub clarity_score: u32,
    pub subscores: Subscores,
    pub score_explanation: Vec<String>,
    /// Same list as `SignalSet::vague_matches`; feeds `Highlights::vague_words`
    pub vague_words: Vec<String>,
}

/// Category of a detected weakness.
///
/// Labels outside the eight known kinds are kept verbatim in `Other` so a model
/// answer is never silently relabelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WeaknessKind {
    Ambiguity,
    MissingContext,
    VagueLanguage,
    OverlyBroadScope,
    MissingOutputFormat,
    LackOfConstraints,
    ContradictoryInstructions,
    MissingRoleOrAudience,
    Other(String),
}

impl WeaknessKind {
    pub fn as_str(&self) -> &str {
        match self {
            WeaknessKind::Ambiguity => "Ambiguity",
            WeaknessKind::MissingContext => "Missing Context",
            WeaknessKind::VagueLanguage => "Vague Language",
            WeaknessKind::OverlyBroadScope => "Overly Broad Scope",
            WeaknessKind::MissingOutputFormat => "Missing Output Format",
            WeaknessKind::LackOfConstraints => "Lack of Constraints",
            WeaknessKind::ContradictoryInstructions => "Contradictory Instructions",
            WeaknessKind::MissingRoleOrAudience => "Missing Role or Audience",
            WeaknessKind::Other(label) => label,
        }
    }
}

impl From<&str> for WeaknessKind {
    fn from(label: &str) -> Self {
        match label {
            "Ambiguity" => WeaknessKind::Ambiguity,
            "Missing Context" => WeaknessKind::MissingContext,
            "Vague Language" => WeaknessKind::VagueLanguage,
            "Overly Broad Scope" => WeaknessKind::OverlyBroadScope,
            "Missing Output Format" => WeaknessKind::MissingOutputFormat,
            "Lack of Constraints" => WeaknessKind::LackOfConstraints,
            "Contradictory Instructions" => WeaknessKind::ContradictoryInstructions,
            "Missing Role or Audience" => WeaknessKind::MissingRoleOrAudience,
            other => WeaknessKind::Other(other.to_string()),
        }
    }
}

impl From<String> for WeaknessKind {
    fn from(label: String) -> Self {
        WeaknessKind::from(label.as_str())
    }
}

impl From<WeaknessKind> for String {
    fn from(kind: WeaknessKind) -> Self {
        match kind {
            WeaknessKind::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for WeaknessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorized issue found in the prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Weakness {
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "Vague Language")]
    pub kind: WeaknessKind,
    pub explanation: String,
}

/// Three independent rewrites of the prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImprovedPrompts {
    pub structured: String,
    pub concise: String,
    pub detailed: String,
}

impl ImprovedPrompts {
    /// The original prompt in every slot; used whenever the model gives no rewrites
    pub fn identity(prompt: &Prompt) -> Self {
        Self {
            structured: prompt.as_str().to_string(),
            concise: prompt.as_str().to_string(),
            detailed: prompt.as_str().to_string(),
        }
    }
}

/// Quick flags summarizing the prompt's most common problems
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Highlights {
    pub vague_words: Vec<String>,
    pub missing_output_spec: bool,
    pub conflicting_instructions: bool,
}

/// The complete report returned for one prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub weaknesses: Vec<Weakness>,
    pub improved_prompts: ImprovedPrompts,
    pub highlights: Highlights,
    pub subscores: Subscores,
    pub clarity_score: u32,
    pub score_explanation: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weakness_kind_labels_roundtrip() {
        for label in [
            "Ambiguity",
            "Missing Context",
            "Vague Language",
            "Overly Broad Scope",
            "Missing Output Format",
            "Lack of Constraints",
            "Contradictory Instructions",
            "Missing Role or Audience",
        ] {
            let kind = WeaknessKind::from(label);
            assert!(!matches!(kind, WeaknessKind::Other(_)), "{label}");
            assert_eq!(kind.as_str(), label);
        }
    }

    #[test]
    fn test_unknown_weakness_kind_kept_verbatim() {
        let kind = WeaknessKind::from("Tone Mismatch");
        assert_eq!(kind, WeaknessKind::Other("Tone Mismatch".to_string()));
        assert_eq!(String::from(kind), "Tone Mismatch");
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let prompt = Prompt::new("summarize this").unwrap();
        let result = AnalysisResult {
            weaknesses: vec![Weakness {
                kind: WeaknessKind::MissingOutputFormat,
                explanation: "No format requested.".to_string(),
            }],
            improved_prompts: ImprovedPrompts::identity(&prompt),
            highlights: Highlights {
                vague_words: vec![],
                missing_output_spec: true,
                conflicting_instructions: false,
            },
            subscores: Subscores {
                clarity: 100,
                structure: 55,
                specificity: 90,
                context: 65,
                constraints: 70,
            },
            clarity_score: 15,
            score_explanation: vec![],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["weaknesses"][0]["type"], "Missing Output Format");
        assert_eq!(json["improvedPrompts"]["concise"], "summarize this");
        assert_eq!(json["highlights"]["missingOutputSpec"], true);
        assert_eq!(json["clarityScore"], 15);
        assert!(json.get("scoreExplanation").is_some());
    }
}
