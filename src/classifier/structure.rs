//! Whole-file structural scoring
//!
//! Generated files tend to look tidy as a whole: uniform indentation, lots of
//! aligned punctuation, heavy commenting, defensive checks everywhere and none
//! of the debris a person leaves behind. Each of those shapes adds a fixed
//! increment to a bias in [0, 1]. A high bias nudges the confidence of lines
//! that are already classified as AI; it never changes a label.

use crate::models::LineVerdict;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Bias above which AI-labelled lines get nudged
pub const BIAS_THRESHOLD: f64 = 0.5;
pub const BIAS_NUDGE: f64 = 0.05;

const HOMOGENEOUS_INDENT_RATIO: f64 = 0.9;
const ALIGNED_TOKEN_RATIO: f64 = 0.4;
const MIN_LINES_FOR_TIDINESS: usize = 10;
const COMMENT_RATIO: f64 = 0.3;
const DEFENSIVE_TOKEN_RATIO: f64 = 0.1;
const PREAMBLE_WINDOW: usize = 20;

const HOMOGENEOUS_INDENT_WEIGHT: f64 = 0.3;
const ALIGNED_TOKEN_WEIGHT: f64 = 0.2;
const NO_MESS_WEIGHT: f64 = 0.15;
const COMMENT_WEIGHT: f64 = 0.2;
const DEFENSIVE_WEIGHT: f64 = 0.25;
const PREAMBLE_WEIGHT: f64 = 0.2;

static ALIGNED: OnceLock<Regex> = OnceLock::new();
static MESSY: OnceLock<Regex> = OnceLock::new();
static COMMENT: OnceLock<Regex> = OnceLock::new();
static ERROR_TOKENS: OnceLock<Regex> = OnceLock::new();
static VALIDATION_TOKENS: OnceLock<Regex> = OnceLock::new();
static PREAMBLE: OnceLock<Regex> = OnceLock::new();

fn aligned_re() -> &'static Regex {
    ALIGNED.get_or_init(|| {
        Regex::new(r#"[{\[(]\s*$|^[}\])]|,\s*$|^["']?[\w-]+["']?\s*:\s"#).expect("valid regex")
    })
}

fn messy_re() -> &'static Regex {
    MESSY.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:console\.log|print|println!|dbg!|fmt\.Println|System\.out\.println|var_dump)\(|\b(?:TODO|FIXME|XXX|HACK)\b|\S(?: {2,}|\t)\S|;;|,,|!!!|\?\?\?|\.{4,}",
        )
        .expect("valid regex")
    })
}

fn comment_re() -> &'static Regex {
    COMMENT.get_or_init(|| {
        Regex::new(r#"^(?://|/\*|\*|#(?:\s|$)|"""|''')"#).expect("valid regex")
    })
}

fn error_tokens_re() -> &'static Regex {
    ERROR_TOKENS.get_or_init(|| {
        Regex::new(
            r"\b(?:try|catch|except|finally|throw|throws|raise|rescue)\b|\bErr\(|\bResult<|\.catch\(",
        )
        .expect("valid regex")
    })
}

fn validation_tokens_re() -> &'static Regex {
    VALIDATION_TOKENS.get_or_init(|| {
        Regex::new(
            r"(?i)\bvalidat\w*|\bisinstance\(|\btypeof\b|\binstanceof\b|\bassert\w*|\bisNaN\(|\.is_empty\(\)|\.is_none\(\)|!==?\s*(?:null|undefined)\b|\bis\s+(?:not\s+)?None\b|[!=]=\s*nil\b",
        )
        .expect("valid regex")
    })
}

fn preamble_re() -> &'static Regex {
    PREAMBLE.get_or_init(|| {
        Regex::new(
            r#"["']use strict["']|from __future__ import|from typing import|^import typing|#!\[(?:deny|forbid|warn)\(|@ts-check|from pydantic import|from ["']zod["']|import \{ z \}|set -euo pipefail"#,
        )
        .expect("valid regex")
    })
}

/// Share of lines whose leading whitespace is consistent with the rest of
/// the file: not mixed tabs and spaces, and for space indents a multiple of
/// the smallest space indent in the file.
fn indentation_homogeneity(lines: &[&str]) -> f64 {
    if lines.is_empty() {
        return 0.0;
    }
    let indents: Vec<&str> = lines
        .iter()
        .map(|l| &l[..l.len() - l.trim_start().len()])
        .collect();
    let unit = indents
        .iter()
        .filter(|i| !i.is_empty() && i.bytes().all(|b| b == b' '))
        .map(|i| i.len())
        .min();

    let consistent = indents
        .iter()
        .filter(|indent| {
            if indent.is_empty() || indent.bytes().all(|b| b == b'\t') {
                true
            } else if indent.bytes().all(|b| b == b' ') {
                unit.map_or(true, |u| indent.len() % u == 0)
            } else {
                false
            }
        })
        .count();
    consistent as f64 / lines.len() as f64
}

fn is_messy(line: &str) -> bool {
    line.ends_with([' ', '\t']) || messy_re().is_match(line.trim_start())
}

/// Score the overall shape of a file. Returns a bias in [0, 1].
pub fn structural_bias(text: &str) -> f64 {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return 0.0;
    }
    let n = lines.len() as f64;
    let mut bias = 0.0;
    let mut signals: Vec<&str> = Vec::new();

    if indentation_homogeneity(&lines) > HOMOGENEOUS_INDENT_RATIO {
        bias += HOMOGENEOUS_INDENT_WEIGHT;
        signals.push("homogeneous-indentation");
    }

    let aligned = lines
        .iter()
        .filter(|l| aligned_re().is_match(l.trim()))
        .count();
    if aligned as f64 / n > ALIGNED_TOKEN_RATIO {
        bias += ALIGNED_TOKEN_WEIGHT;
        signals.push("aligned-tokens");
    }

    if lines.len() > MIN_LINES_FOR_TIDINESS && !lines.iter().any(|l| is_messy(l)) {
        bias += NO_MESS_WEIGHT;
        signals.push("no-mess");
    }

    let comments = lines
        .iter()
        .filter(|l| comment_re().is_match(l.trim_start()))
        .count();
    if comments as f64 / n > COMMENT_RATIO {
        bias += COMMENT_WEIGHT;
        signals.push("comment-heavy");
    }

    let defensive: usize = lines
        .iter()
        .map(|l| error_tokens_re().find_iter(l).count() + validation_tokens_re().find_iter(l).count())
        .sum();
    if defensive as f64 > n * DEFENSIVE_TOKEN_RATIO {
        bias += DEFENSIVE_WEIGHT;
        signals.push("defensive-density");
    }

    if text
        .lines()
        .take(PREAMBLE_WINDOW)
        .any(|l| preamble_re().is_match(l.trim()))
    {
        bias += PREAMBLE_WEIGHT;
        signals.push("defensive-preamble");
    }

    let bias = f64::min(bias, 1.0);
    debug!("Structural bias {:.2} from {:?}", bias, signals);
    bias
}

/// Nudge AI-labelled lines up when the file as a whole looks generated.
/// Human lines and blank lines are left alone.
pub fn apply_structural_bias(verdicts: &mut [LineVerdict], bias: f64) {
    if bias <= BIAS_THRESHOLD {
        return;
    }
    for verdict in verdicts.iter_mut().filter(|v| v.is_ai && !v.is_blank()) {
        verdict.confidence = (verdict.confidence + BIAS_NUDGE).min(super::line::MAX_CONFIDENCE);
    }
}
