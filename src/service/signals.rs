//! Text signal detectors
//!
//! Stateless predicates over prompt text. Every detector is case-insensitive and
//! matches if any of its phrases occurs anywhere in the text. Absence of a
//! signal is a normal result, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::SignalSet;

/// Vague or subjective terms, matched by substring containment in this order.
///
/// `something` counts as `some`.
pub const VAGUE_VOCABULARY: &[&str] = &[
    "maybe",
    "might",
    "some",
    "sort of",
    "kind of",
    "like",
    "generally",
    "usually",
    "often",
    "etc",
    "a bit",
    "slightly",
    "pretty",
    "quite",
    "basically",
    "somehow",
    "around",
    "about",
    "not too long",
    "roughly",
    "approximately",
    "various",
    "a couple",
];

fn phrase_alternation(phrases: &[&str]) -> Regex {
    let alt = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)({alt})")).unwrap()
}

static ROLE_OR_AUDIENCE_RE: Lazy<Regex> = Lazy::new(|| {
    phrase_alternation(&[
        "as a ",
        "for a ",
        "for an ",
        "to someone",
        "audience",
        "role:",
        "you are a",
    ])
});

static FORMAT_RE: Lazy<Regex> = Lazy::new(|| {
    phrase_alternation(&[
        "format",
        "as a list",
        "as json",
        "as a table",
        "markdown",
        "return",
        "bullet points",
        "output",
    ])
});

static CONSTRAINT_RE: Lazy<Regex> = Lazy::new(|| {
    phrase_alternation(&[
        "limit",
        "must",
        "should",
        "within",
        "min",
        "max",
        "required",
        "only",
        "no more than",
        "no less than",
    ])
});

static CONTEXT_RE: Lazy<Regex> = Lazy::new(|| {
    phrase_alternation(&[
        "background",
        "context",
        "assume",
        "given that",
        "in this scenario",
    ])
});

static TASK_RE: Lazy<Regex> = Lazy::new(|| {
    phrase_alternation(&[
        "explain",
        "summarize",
        "analyze",
        "write",
        "generate",
        "compare",
        "refactor",
        "create",
        "design",
        "outline",
        "diagnose",
        "derive",
        "compute",
    ])
});

static EXAMPLE_RE: Lazy<Regex> = Lazy::new(|| {
    phrase_alternation(&[
        "example",
        "e.g.",
        "for instance",
        "sample output",
        "like this",
    ])
});

static STRUCTURAL_CUE_RE: Lazy<Regex> = Lazy::new(|| {
    phrase_alternation(&[
        "step-by-step",
        "first",
        "next",
        "finally",
        "bullet points",
        "table",
        "json",
        "numbered list",
        "sections",
        "outline",
    ])
});

// Opposing instruction pairs; `.` stops at line breaks, so both halves must share a line.
static CONTRADICTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(in detail).*(short|brief|concise)|(short|brief|concise).*(in detail)")
            .unwrap(),
        Regex::new(r"(?i)(be creative).*(objective)|(objective).*(creative)").unwrap(),
        Regex::new(r"(?i)(strictly formal).*(casual)|(casual).*(strict)").unwrap(),
    ]
});

// Local highlight fallbacks. These differ from FORMAT_RE and
// CONTRADICTION_PATTERNS; the second alternation is unanchored, so a bare
// "short", "brief" or "concise" already counts as a conflict.
static OUTPUT_SPEC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(format|output|json|table|list|markdown|bullet)").unwrap());

static FALLBACK_CONFLICT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(in detail).*(short|brief|concise)|short|brief|concise.*(in detail)").unwrap()
});

/// Whitespace-run word count. Empty text counts as one (empty) word.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count().max(1)
}

/// Vocabulary entries contained in the text, deduplicated by entry, in vocabulary order
pub fn vague_matches(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    VAGUE_VOCABULARY
        .iter()
        .filter(|v| lower.contains(*v))
        .map(|v| v.to_string())
        .collect()
}

pub fn has_role_or_audience(text: &str) -> bool {
    ROLE_OR_AUDIENCE_RE.is_match(text)
}

pub fn has_format(text: &str) -> bool {
    FORMAT_RE.is_match(text)
}

pub fn has_constraints(text: &str) -> bool {
    CONSTRAINT_RE.is_match(text)
}

pub fn has_context(text: &str) -> bool {
    CONTEXT_RE.is_match(text)
}

pub fn has_task(text: &str) -> bool {
    TASK_RE.is_match(text)
}

pub fn has_example(text: &str) -> bool {
    EXAMPLE_RE.is_match(text)
}

pub fn is_contradictory(text: &str) -> bool {
    CONTRADICTION_PATTERNS.iter().any(|re| re.is_match(text))
}

pub fn has_structural_cues(text: &str) -> bool {
    STRUCTURAL_CUE_RE.is_match(text)
}

/// Output-format check used only when building local highlights
pub fn lacks_output_spec(text: &str) -> bool {
    !OUTPUT_SPEC_RE.is_match(text)
}

/// Conflict check used only when building local highlights
pub fn has_conflict_marker(text: &str) -> bool {
    FALLBACK_CONFLICT_RE.is_match(text)
}

/// Run every detector over the trimmed text
pub fn detect(text: &str) -> SignalSet {
    let text = text.trim();

    SignalSet {
        has_role_or_audience: has_role_or_audience(text),
        has_format: has_format(text),
        has_constraints: has_constraints(text),
        has_context: has_context(text),
        has_task: has_task(text),
        has_example: has_example(text),
        is_contradictory: is_contradictory(text),
        has_structural_cues: has_structural_cues(text),
        vague_matches: vague_matches(text),
        word_count: word_count(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vague_matches_follow_vocabulary_order() {
        let matches = vague_matches("Roughly speaking, MAYBE write about some things");
        assert_eq!(matches, vec!["maybe", "some", "about", "roughly"]);
    }

    #[test]
    fn test_vague_matches_dedup_by_entry() {
        let matches = vague_matches("maybe maybe maybe");
        assert_eq!(matches, vec!["maybe"]);
    }

    #[test]
    fn test_vague_matches_inside_larger_words() {
        assert_eq!(vague_matches("write something"), vec!["some"]);
        assert_eq!(vague_matches("unlikely"), vec!["like"]);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("write   something\n\tnow"), 3);
        assert_eq!(word_count(""), 1);
    }

    #[test]
    fn test_signal_detectors() {
        assert!(has_role_or_audience("You are an expert editor"));
        assert!(has_role_or_audience("Explain it for a beginner"));
        assert!(!has_role_or_audience("Explain recursion"));

        assert!(has_format("Return the answer AS JSON"));
        assert!(!has_format("Explain recursion"));

        assert!(has_constraints("No more than three sentences"));
        assert!(has_context("Assume the reader knows Rust"));
        assert!(has_task("Please SUMMARIZE the article"));
        assert!(has_example("Use a format like this: a, b"));
        assert!(has_example("e.g. a list"));
        assert!(has_structural_cues("Go step-by-step"));
        assert!(!has_structural_cues("Explain recursion"));
    }

    #[test]
    fn test_contradiction_patterns() {
        assert!(is_contradictory("Explain in detail but keep it short"));
        assert!(is_contradictory("Keep it brief, explain in detail"));
        assert!(is_contradictory("Be creative and stay objective"));
        assert!(is_contradictory("Write casually but be strictly formal"));
        assert!(!is_contradictory("Explain in detail"));
        // Halves on different lines do not combine
        assert!(!is_contradictory("Explain in detail\nKeep it short"));
    }

    #[test]
    fn test_detect_write_something() {
        let signals = detect("write something");
        assert!(signals.has_task);
        assert!(!signals.has_format);
        assert!(!signals.has_constraints);
        assert!(!signals.has_role_or_audience);
        assert!(!signals.has_context);
        assert!(!signals.has_example);
        assert!(!signals.is_contradictory);
        assert!(!signals.has_structural_cues);
        assert_eq!(signals.word_count, 2);
    }

    #[test]
    fn test_local_highlight_patterns_differ_from_scoring_patterns() {
        // "list" satisfies the output-spec fallback but not the scoring format check
        assert!(!lacks_output_spec("Give me a list of fruits"));
        assert!(!has_format("Give me a list of fruits"));

        // "return" satisfies the scoring format check but not the fallback
        assert!(has_format("Return three fruits"));
        assert!(lacks_output_spec("Return three fruits"));

        // A lone "short" is a conflict for the fallback but not for scoring
        assert!(has_conflict_marker("Write a short poem"));
        assert!(!is_contradictory("Write a short poem"));

        assert!(has_conflict_marker("explain in detail and keep it short"));
    }

    #[test]
    fn test_local_highlight_patterns_differ_from_instruction_rules() {
        use crate::service::analysis::prompts::DEFAULT_INSTRUCTION;

        // The model is told paragraphs, steps and code blocks count as an
        // output format; the local check knows none of them
        assert!(DEFAULT_INSTRUCTION.contains("code block, steps, paragraphs"));
        assert!(lacks_output_spec("Answer in three paragraphs"));
        assert!(lacks_output_spec("Give the steps"));

        // "list them" is a format for both
        assert!(DEFAULT_INSTRUCTION.contains("“list them”"));
        assert!(!lacks_output_spec("Name five rivers and list them"));

        // The model only flags opposing pairs; the local check flags a lone "short"
        assert!(DEFAULT_INSTRUCTION.contains("“explain in detail” + “keep short”"));
        assert!(has_conflict_marker("Keep it short"));
        assert!(!is_contradictory("Keep it short"));
    }
}
