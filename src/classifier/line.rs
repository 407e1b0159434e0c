//! Per-line classification
//!
//! Every trimmed line is scored against the pattern library, then against a
//! few fixed line-shape heuristics. AI and human evidence accumulate
//! separately; the larger side wins and its share of the total becomes the
//! confidence.

use super::rules::{self, DetectionRule};
use crate::models::{LineVerdict, Polarity};

pub const MIN_CONFIDENCE: f64 = 0.1;
pub const MAX_CONFIDENCE: f64 = 0.95;

const LONG_LINE_CHARS: usize = 120;
const SHORT_LINE_CHARS: usize = 20;
const CLEAN_LINE_MIN_CHARS: usize = 30;

const LONG_LINE_WEIGHT: f64 = 0.3;
const SHORT_LINE_WEIGHT: f64 = 0.3;
const CLEAN_LINE_WEIGHT: f64 = 0.15;
const PLAYFUL_WEIGHT: f64 = 0.5;

pub const NEUTRAL_RATIONALE: &str = "No distinctive patterns detected";

const STRUCTURAL_PUNCTUATION: &[char] = &['{', '}', '(', ')', '[', ']', ';', '=', ',', ':'];

/// Evidence collected for one line.
///
/// Weights are summed in integer hundredths so that equal decimal totals
/// compare equal and the tie goes to Human.
#[derive(Debug, Default)]
struct Evidence {
    ai: u32,
    human: u32,
    rationale: Vec<String>,
}

fn hundredths(weight: f64) -> u32 {
    (weight.max(0.0) * 100.0).round() as u32
}

impl Evidence {
    fn add(&mut self, polarity: Polarity, weight: f64, rationale: &str) {
        let points = hundredths(weight);
        match polarity {
            Polarity::Ai => self.ai += points,
            Polarity::Human => self.human += points,
        }
        self.rationale.push(rationale.to_string());
    }

    fn apply(&mut self, rules: &[DetectionRule], line: &str) {
        for rule in rules {
            if rule.matcher.is_match(line) {
                self.add(rule.polarity, rule.weight, rule.rationale);
            }
        }
    }

    fn confidence(&self) -> f64 {
        let total = self.ai + self.human;
        let raw = if total > 0 {
            f64::from(self.ai.max(self.human)) / f64::from(total)
        } else {
            0.5
        };
        clamp_confidence(raw)
    }
}

fn clamp_confidence(value: f64) -> f64 {
    value.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

fn is_clean(line: &str) -> bool {
    line.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || c.is_whitespace()
            || matches!(
                c,
                '_' | '.' | ',' | ';' | ':' | '=' | '(' | ')' | '{' | '}' | '[' | ']' | '<' | '>'
                    | '\'' | '"' | '+' | '-' | '*' | '/'
            )
    })
}

/// Classify one line of source text.
///
/// `line_number` is carried into the verdict for display only; it never
/// influences the score.
pub fn classify_line(line: &str, line_number: usize, language: &str) -> LineVerdict {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineVerdict::neutral(line_number, line);
    }

    let mut evidence = Evidence::default();
    evidence.apply(rules::generic_rules(), trimmed);
    evidence.apply(rules::language_rules(language), trimmed);

    let len = trimmed.chars().count();
    if len > LONG_LINE_CHARS {
        evidence.add(
            Polarity::Ai,
            LONG_LINE_WEIGHT,
            "Very long line, typical of generated code",
        );
    } else if len < SHORT_LINE_CHARS && !trimmed.contains(STRUCTURAL_PUNCTUATION) {
        evidence.add(
            Polarity::Human,
            SHORT_LINE_WEIGHT,
            "Short line without structural punctuation",
        );
    }

    if len > CLEAN_LINE_MIN_CHARS && is_clean(trimmed) {
        evidence.add(
            Polarity::Ai,
            CLEAN_LINE_WEIGHT,
            "Uniformly clean character set",
        );
    }

    if rules::contains_playful_token(trimmed) {
        evidence.add(
            Polarity::Human,
            PLAYFUL_WEIGHT,
            "Playful or placeholder naming",
        );
    }

    let confidence = evidence.confidence();
    let is_ai = evidence.ai > evidence.human;
    if evidence.rationale.is_empty() {
        evidence.rationale.push(NEUTRAL_RATIONALE.to_string());
    }

    LineVerdict {
        line_number,
        content: line.to_string(),
        is_ai,
        confidence,
        rationale: evidence.rationale,
    }
}
