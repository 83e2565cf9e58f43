//! Deterministic clarity scoring
//!
//! Turns the signal set of a prompt into penalties, a bonus, the clamped
//! aggregate score, five sub-scores and an ordered explanation. The result
//! depends only on the prompt text.

use crate::model::{ScoreReport, SignalSet, Subscores};
use crate::service::signals;

struct ScoringWeights {
    score_max: i32,
    vague_tiers: &'static [(usize, i32)],
    missing_task: i32,
    missing_format: i32,
    missing_constraints: i32,
    missing_role: i32,
    missing_context: i32,
    missing_example: i32,
    contradiction: i32,
    very_short_words: usize,
    very_short_penalty: i32,
    short_words: usize,
    short_penalty: i32,
    long_words: usize,
    long_penalty: i32,
    structure_bonus: i32,
    specificity_no_example: i32,
    context_no_context: i32,
    context_no_role: i32,
    constraints_missing: i32,
}

static WEIGHTS: ScoringWeights = ScoringWeights {
    score_max: 100,
    // Highest tier reached wins
    vague_tiers: &[(5, 30), (3, 20), (1, 10)],
    missing_task: 15,
    missing_format: 15,
    missing_constraints: 15,
    missing_role: 10,
    missing_context: 10,
    missing_example: 5,
    contradiction: 15,
    very_short_words: 5,
    very_short_penalty: 30,
    short_words: 12,
    short_penalty: 15,
    long_words: 200,
    long_penalty: 10,
    structure_bonus: 10,
    specificity_no_example: 10,
    context_no_context: 20,
    context_no_role: 15,
    constraints_missing: 30,
};

const EXPLAIN_VAGUE: &str = "The prompt contains vague or subjective wording.";
const EXPLAIN_NO_TASK: &str = "The prompt lacks a clear action or task verb.";
const EXPLAIN_NO_FORMAT: &str = "The prompt does not specify an output format.";
const EXPLAIN_NO_CONSTRAINTS: &str =
    "The prompt does not specify constraints (length, style, rules).";
const EXPLAIN_NO_ROLE: &str = "The prompt does not specify a target role or audience.";
const EXPLAIN_NO_CONTEXT: &str = "The prompt lacks contextual background.";
const EXPLAIN_NO_EXAMPLE: &str = "Adding examples would increase clarity.";
const EXPLAIN_CONTRADICTION: &str = "The prompt contains contradictory instructions.";
const EXPLAIN_TOO_SHORT: &str = "The prompt is too short to be precise.";
const EXPLAIN_TOO_LONG: &str = "The prompt may be overly long and unfocused.";

/// Individual penalty and bonus components of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Penalties {
    pub vague: i32,
    pub missing: i32,
    pub contradiction: i32,
    pub length: i32,
    pub structure_bonus: i32,
}

impl Penalties {
    pub fn from_signals(signals: &SignalSet) -> Self {
        Self {
            vague: vague_penalty(signals.vague_matches.len()),
            missing: missing_penalty(signals),
            contradiction: if signals.is_contradictory {
                WEIGHTS.contradiction
            } else {
                0
            },
            length: length_penalty(signals.word_count),
            structure_bonus: if signals.has_structural_cues {
                WEIGHTS.structure_bonus
            } else {
                0
            },
        }
    }
}

fn vague_penalty(distinct_matches: usize) -> i32 {
    WEIGHTS
        .vague_tiers
        .iter()
        .find(|(min, _)| distinct_matches >= *min)
        .map(|(_, penalty)| *penalty)
        .unwrap_or(0)
}

fn missing_penalty(signals: &SignalSet) -> i32 {
    [
        (signals.has_task, WEIGHTS.missing_task),
        (signals.has_format, WEIGHTS.missing_format),
        (signals.has_constraints, WEIGHTS.missing_constraints),
        (signals.has_role_or_audience, WEIGHTS.missing_role),
        (signals.has_context, WEIGHTS.missing_context),
        (signals.has_example, WEIGHTS.missing_example),
    ]
    .iter()
    .filter(|(present, _)| !present)
    .map(|(_, weight)| weight)
    .sum()
}

fn length_penalty(word_count: usize) -> i32 {
    if word_count < WEIGHTS.very_short_words {
        WEIGHTS.very_short_penalty
    } else if word_count < WEIGHTS.short_words {
        WEIGHTS.short_penalty
    } else if word_count > WEIGHTS.long_words {
        WEIGHTS.long_penalty
    } else {
        0
    }
}

fn floor_zero(value: i32) -> u32 {
    value.max(0) as u32
}

fn subscores(signals: &SignalSet, p: &Penalties) -> Subscores {
    let base = WEIGHTS.score_max;
    let unless = |present: bool, weight: i32| if present { 0 } else { weight };

    Subscores {
        clarity: floor_zero(base - p.vague - p.contradiction),
        structure: floor_zero(base - p.missing + p.structure_bonus),
        specificity: floor_zero(
            base - p.vague - unless(signals.has_example, WEIGHTS.specificity_no_example),
        ),
        context: floor_zero(
            base - unless(signals.has_context, WEIGHTS.context_no_context)
                - unless(signals.has_role_or_audience, WEIGHTS.context_no_role),
        ),
        constraints: floor_zero(
            base - unless(signals.has_constraints, WEIGHTS.constraints_missing),
        ),
    }
}

fn explanation(signals: &SignalSet, p: &Penalties) -> Vec<String> {
    let triggered = [
        (p.vague > 0, EXPLAIN_VAGUE),
        (!signals.has_task, EXPLAIN_NO_TASK),
        (!signals.has_format, EXPLAIN_NO_FORMAT),
        (!signals.has_constraints, EXPLAIN_NO_CONSTRAINTS),
        (!signals.has_role_or_audience, EXPLAIN_NO_ROLE),
        (!signals.has_context, EXPLAIN_NO_CONTEXT),
        (!signals.has_example, EXPLAIN_NO_EXAMPLE),
        (signals.is_contradictory, EXPLAIN_CONTRADICTION),
        (signals.word_count < WEIGHTS.short_words, EXPLAIN_TOO_SHORT),
        (signals.word_count > WEIGHTS.long_words, EXPLAIN_TOO_LONG),
    ];

    triggered
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, sentence)| sentence.to_string())
        .collect()
}

/// Score an already-detected signal set
pub fn score_signals(signals: &SignalSet) -> ScoreReport {
    let p = Penalties::from_signals(signals);

    let raw = WEIGHTS.score_max - p.vague - p.missing - p.contradiction - p.length
        + p.structure_bonus;
    let clarity_score = raw.clamp(0, WEIGHTS.score_max) as u32;

    ScoreReport {
        clarity_score,
        subscores: subscores(signals, &p),
        score_explanation: explanation(signals, &p),
        vague_words: signals.vague_matches.clone(),
    }
}

/// Score any text. Never fails, including on empty input.
pub fn score(text: &str) -> ScoreReport {
    let signals = signals::detect(text);

    tracing::debug!(
        word_count = signals.word_count,
        vague_matches = signals.vague_matches.len(),
        contradictory = signals.is_contradictory,
        "Computed prompt signals"
    );

    score_signals(&signals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals_with(vague: usize, word_count: usize) -> SignalSet {
        SignalSet {
            has_role_or_audience: true,
            has_format: true,
            has_constraints: true,
            has_context: true,
            has_task: true,
            has_example: true,
            is_contradictory: false,
            has_structural_cues: false,
            vague_matches: (0..vague).map(|i| format!("v{i}")).collect(),
            word_count,
        }
    }

    #[test]
    fn test_vague_tiers_override() {
        assert_eq!(vague_penalty(0), 0);
        assert_eq!(vague_penalty(1), 10);
        assert_eq!(vague_penalty(2), 10);
        assert_eq!(vague_penalty(3), 20);
        assert_eq!(vague_penalty(4), 20);
        assert_eq!(vague_penalty(5), 30);
        assert_eq!(vague_penalty(23), 30);
    }

    #[test]
    fn test_length_tiers_exclusive() {
        assert_eq!(length_penalty(1), 30);
        assert_eq!(length_penalty(4), 30);
        assert_eq!(length_penalty(5), 15);
        assert_eq!(length_penalty(11), 15);
        assert_eq!(length_penalty(12), 0);
        assert_eq!(length_penalty(200), 0);
        assert_eq!(length_penalty(201), 10);
    }

    #[test]
    fn test_write_something() {
        let report = score("write something");
        let p = Penalties::from_signals(&signals::detect("write something"));

        assert_eq!(p.length, 30);
        assert_eq!(p.missing, 15 + 15 + 10 + 10 + 5);
        assert_eq!(p.contradiction, 0);
        assert_eq!(p.structure_bonus, 0);
        // "something" contains the vocabulary entry "some"
        assert_eq!(report.vague_words, vec!["some"]);
        assert_eq!(p.vague, 10);
        assert_eq!(report.clarity_score, 100 - 10 - 55 - 0 - 30);
    }

    #[test]
    fn test_all_signals_present() {
        let report = score_signals(&signals_with(0, 40));
        assert_eq!(report.clarity_score, 100);
        assert_eq!(
            report.subscores,
            Subscores {
                clarity: 100,
                structure: 100,
                specificity: 100,
                context: 100,
                constraints: 100,
            }
        );
        assert!(report.score_explanation.is_empty());
    }

    #[test]
    fn test_structure_bonus_clamps_aggregate_not_subscore() {
        let mut signals = signals_with(0, 40);
        signals.has_structural_cues = true;
        let report = score_signals(&signals);
        assert_eq!(report.clarity_score, 100);
        assert_eq!(report.subscores.structure, 110);
    }

    #[test]
    fn test_floor_at_zero() {
        let signals = SignalSet {
            has_role_or_audience: false,
            has_format: false,
            has_constraints: false,
            has_context: false,
            has_task: false,
            has_example: false,
            is_contradictory: true,
            has_structural_cues: false,
            vague_matches: (0..6).map(|i| format!("v{i}")).collect(),
            word_count: 1,
        };
        let report = score_signals(&signals);
        assert_eq!(report.clarity_score, 0);
        assert_eq!(report.subscores.clarity, 55);
        assert_eq!(report.subscores.structure, 30);
        assert_eq!(report.subscores.specificity, 60);
        assert_eq!(report.subscores.context, 65);
        assert_eq!(report.subscores.constraints, 70);
    }

    #[test]
    fn test_explanation_order_is_fixed() {
        let signals = SignalSet {
            has_role_or_audience: false,
            has_format: true,
            has_constraints: false,
            has_context: true,
            has_task: false,
            has_example: true,
            is_contradictory: true,
            has_structural_cues: false,
            vague_matches: vec!["maybe".to_string()],
            word_count: 250,
        };
        let report = score_signals(&signals);
        assert_eq!(
            report.score_explanation,
            vec![
                EXPLAIN_VAGUE,
                EXPLAIN_NO_TASK,
                EXPLAIN_NO_CONSTRAINTS,
                EXPLAIN_NO_ROLE,
                EXPLAIN_CONTRADICTION,
                EXPLAIN_TOO_LONG,
            ]
        );
    }

    #[test]
    fn test_contradiction_penalty_applied_once() {
        let text = "You are a tutor. Explain in detail and keep it short, be creative but objective. \
                    Return a markdown list with no more than five items, given that the reader is new, for example like this.";
        let report = score(text);
        let signals = signals::detect(text);
        assert!(signals.is_contradictory);
        assert_eq!(Penalties::from_signals(&signals).contradiction, 15);
        assert!(report.score_explanation.contains(&EXPLAIN_CONTRADICTION.to_string()));
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let text = "Maybe write some kind of summary, roughly about various topics, etc.";
        assert_eq!(score(text), score(text));
    }

    #[test]
    fn test_empty_text_scores() {
        let report = score("   ");
        assert!(report.clarity_score <= 100);
        assert!(report.score_explanation.contains(&EXPLAIN_TOO_SHORT.to_string()));
    }

    #[test]
    fn test_scores_stay_in_range() {
        let long = "word ".repeat(300);
        for text in [
            "",
            "x",
            "write something",
            long.as_str(),
            "Step-by-step, first outline sections as JSON in a table, then explain.",
        ] {
            let report = score(text);
            assert!(report.clarity_score <= 100, "{text}");
        }
    }
}
