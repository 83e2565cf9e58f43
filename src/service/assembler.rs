//! Assembly of the final analysis result
//!
//! The heuristic score is always computed locally. Weaknesses, rewrites and
//! highlight flags come from the model when it answers usefully and from
//! deterministic fallbacks otherwise, so every request ends in a complete
//! `AnalysisResult`.

use serde_json::Value;

use crate::model::{AnalysisResult, Highlights, ImprovedPrompts, Prompt, Weakness, WeaknessKind};
use crate::service::analysis::{ExternalAnalysisAdapter, ExternalCallError};
use crate::service::extraction::JsonObject;
use crate::service::{scoring, signals};

/// Longest synthesized explanation built from an unexpected weakness shape
const MAX_SYNTHESIZED_EXPLANATION_CHARS: usize = 200;

const UNEXPECTED_WEAKNESS_PLACEHOLDER: &str =
    "Undetected issue (model returned unexpected format).";

/// The model-sourced part of a result: weaknesses, rewrites, highlights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelVerdict {
    pub weaknesses: Vec<Weakness>,
    pub improved_prompts: ImprovedPrompts,
    pub highlights: Highlights,
}

impl ModelVerdict {
    /// Deterministic stand-in used whenever the model gives nothing usable.
    ///
    /// No weaknesses, the original prompt as every rewrite, and highlights
    /// computed from the prompt text.
    pub fn identity_fallback(prompt: &Prompt, vague_words: &[String]) -> Self {
        Self {
            weaknesses: Vec::new(),
            improved_prompts: ImprovedPrompts::identity(prompt),
            highlights: local_highlights(prompt, vague_words),
        }
    }

    /// Take what is usable from the model's JSON and fill the rest from the fallback
    pub fn from_model_output(mut output: JsonObject, prompt: &Prompt, vague_words: &[String]) -> Self {
        let fallback = Self::identity_fallback(prompt, vague_words);

        let weaknesses = match output.remove("weaknesses") {
            Some(Value::Array(entries)) => entries.into_iter().map(normalize_weakness).collect(),
            _ => Vec::new(),
        };

        let improved_prompts = match output.remove("improvedPrompts") {
            Some(Value::Object(rewrites)) => ImprovedPrompts {
                structured: text_or(&rewrites, "structured", &fallback.improved_prompts.structured),
                concise: text_or(&rewrites, "concise", &fallback.improved_prompts.concise),
                detailed: text_or(&rewrites, "detailed", &fallback.improved_prompts.detailed),
            },
            _ => fallback.improved_prompts,
        };

        // vagueWords always comes from the local vocabulary scan
        let highlights = match output.remove("highlights") {
            Some(Value::Object(flags)) => Highlights {
                vague_words: fallback.highlights.vague_words,
                missing_output_spec: flag_or(
                    &flags,
                    "missingOutputSpec",
                    fallback.highlights.missing_output_spec,
                ),
                conflicting_instructions: flag_or(
                    &flags,
                    "conflictingInstructions",
                    fallback.highlights.conflicting_instructions,
                ),
            },
            _ => fallback.highlights,
        };

        Self {
            weaknesses,
            improved_prompts,
            highlights,
        }
    }
}

/// The model's string for `key`, or the fallback when absent or not a string
fn text_or(fields: &JsonObject, key: &str, fallback: &str) -> String {
    match fields.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(other) => {
            tracing::warn!(field = key, value = %other, "Model rewrite is not text, keeping original prompt");
            fallback.to_string()
        }
        None => fallback.to_string(),
    }
}

/// The model's flag for `key`, or the local flag when absent or not a boolean
fn flag_or(fields: &JsonObject, key: &str, fallback: bool) -> bool {
    fields.get(key).and_then(Value::as_bool).unwrap_or(fallback)
}

/// Highlights derived from the prompt text alone
pub fn local_highlights(prompt: &Prompt, vague_words: &[String]) -> Highlights {
    Highlights {
        vague_words: vague_words.to_vec(),
        missing_output_spec: signals::lacks_output_spec(prompt.as_str()),
        conflicting_instructions: signals::has_conflict_marker(prompt.as_str()),
    }
}

/// Coerce one model weakness entry into `{type, explanation}`
pub fn normalize_weakness(entry: Value) -> Weakness {
    match entry {
        Value::String(explanation) => Weakness {
            kind: WeaknessKind::VagueLanguage,
            explanation,
        },
        Value::Object(ref fields) => {
            let kind = fields
                .get("type")
                .and_then(Value::as_str)
                .map(WeaknessKind::from)
                .unwrap_or(WeaknessKind::VagueLanguage);
            let explanation = fields
                .get("explanation")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| synthesized_explanation(&entry));
            Weakness { kind, explanation }
        }
        Value::Array(_) => Weakness {
            kind: WeaknessKind::VagueLanguage,
            explanation: synthesized_explanation(&entry),
        },
        Value::Null | Value::Bool(_) | Value::Number(_) => Weakness {
            kind: WeaknessKind::VagueLanguage,
            explanation: UNEXPECTED_WEAKNESS_PLACEHOLDER.to_string(),
        },
    }
}

fn synthesized_explanation(entry: &Value) -> String {
    entry
        .to_string()
        .chars()
        .take(MAX_SYNTHESIZED_EXPLANATION_CHARS)
        .collect()
}

/// Runs one complete analysis: local score plus model verdict or fallback
pub struct AnalysisService {
    adapter: Option<ExternalAnalysisAdapter>,
}

impl AnalysisService {
    /// `None` runs every analysis on the deterministic fallback
    pub fn new(adapter: Option<ExternalAnalysisAdapter>) -> Self {
        if adapter.is_none() {
            tracing::warn!("Generative model disabled, analyses will use local fallback content");
        }
        Self { adapter }
    }

    pub fn is_model_enabled(&self) -> bool {
        self.adapter.is_some()
    }

    pub async fn analyze(&self, prompt: &Prompt) -> AnalysisResult {
        let report = scoring::score(prompt.as_str());

        let verdict = match self.request_verdict(prompt).await {
            Ok(output) => ModelVerdict::from_model_output(output, prompt, &report.vague_words),
            Err(ExternalCallError::NotConfigured) => {
                ModelVerdict::identity_fallback(prompt, &report.vague_words)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Model analysis failed, using fallback content");
                ModelVerdict::identity_fallback(prompt, &report.vague_words)
            }
        };

        tracing::info!(
            clarity_score = report.clarity_score,
            weaknesses = verdict.weaknesses.len(),
            "Prompt analysis assembled"
        );

        AnalysisResult {
            weaknesses: verdict.weaknesses,
            improved_prompts: verdict.improved_prompts,
            highlights: verdict.highlights,
            subscores: report.subscores,
            clarity_score: report.clarity_score,
            score_explanation: report.score_explanation,
        }
    }

    async fn request_verdict(&self, prompt: &Prompt) -> Result<JsonObject, ExternalCallError> {
        match &self.adapter {
            Some(adapter) => adapter.request_analysis(prompt).await,
            None => Err(ExternalCallError::NotConfigured),
        }
    }
}
