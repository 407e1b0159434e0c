//! Contextual smoothing of line verdicts
//!
//! Two forward passes over one file's verdicts:
//!
//! 1. Sandwich: a human line whose nearest non-blank neighbors are both AI
//!    is pulled over to AI.
//! 2. Block extension: a human line right after a run of at least three AI
//!    lines is pulled over when an AI line follows within the next two
//!    non-blank lines.
//!
//! Lines with a human signature (see [`rules::is_human_signature`]) are
//! exempt from both. Passes only ever flip human lines to AI, raise
//! confidence and append rationale. Nothing is revisited once emitted, and a
//! flip from the first pass is visible to the second.

use super::rules;
use crate::models::LineVerdict;

pub const SANDWICH_MIN_CONFIDENCE: f64 = 0.7;
pub const BLOCK_MIN_CONFIDENCE: f64 = 0.6;

const BLOCK_MIN_RUN: usize = 3;
const BLOCK_LOOKAHEAD: usize = 2;

pub const SANDWICH_RATIONALE: &str = "Sandwiched between AI-classified lines";
pub const BLOCK_RATIONALE: &str = "Block extension: continues a run of AI-classified lines";

fn flip_to_ai(verdict: &mut LineVerdict, min_confidence: f64, rationale: &str) {
    verdict.is_ai = true;
    verdict.confidence = verdict.confidence.max(min_confidence);
    verdict.rationale.push(rationale.to_string());
}

/// Run both smoothing passes in order
pub fn smooth(verdicts: &mut [LineVerdict]) {
    apply_sandwich(verdicts);
    extend_blocks(verdicts);
}

/// Pass 1. Blank lines are skipped and do not break adjacency.
pub fn apply_sandwich(verdicts: &mut [LineVerdict]) {
    let positions: Vec<usize> = verdicts
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_blank())
        .map(|(i, _)| i)
        .collect();

    for w in 1..positions.len().saturating_sub(1) {
        let (prev, cur, next) = (positions[w - 1], positions[w], positions[w + 1]);
        if verdicts[cur].is_ai || !verdicts[prev].is_ai || !verdicts[next].is_ai {
            continue;
        }
        if rules::is_human_signature(&verdicts[cur].content) {
            continue;
        }
        flip_to_ai(&mut verdicts[cur], SANDWICH_MIN_CONFIDENCE, SANDWICH_RATIONALE);
    }
}

/// Pass 2. The AI run counter resets on blank lines and on human lines that
/// stay human; a flipped line extends the run.
pub fn extend_blocks(verdicts: &mut [LineVerdict]) {
    let mut run = 0usize;

    for i in 0..verdicts.len() {
        if verdicts[i].is_blank() {
            run = 0;
            continue;
        }
        if verdicts[i].is_ai {
            run += 1;
            continue;
        }

        if run >= BLOCK_MIN_RUN && !rules::is_human_signature(&verdicts[i].content) {
            let ai_ahead = verdicts[i + 1..]
                .iter()
                .filter(|v| !v.is_blank())
                .take(BLOCK_LOOKAHEAD)
                .any(|v| v.is_ai);
            if ai_ahead {
                flip_to_ai(&mut verdicts[i], BLOCK_MIN_CONFIDENCE, BLOCK_RATIONALE);
                run += 1;
                continue;
            }
        }
        run = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ai(content: &str) -> LineVerdict {
        LineVerdict {
            line_number: 0,
            content: content.to_string(),
            is_ai: true,
            confidence: 0.8,
            rationale: vec!["seed".into()],
        }
    }

    fn human(content: &str) -> LineVerdict {
        LineVerdict {
            line_number: 0,
            content: content.to_string(),
            is_ai: false,
            confidence: 0.55,
            rationale: vec!["seed".into()],
        }
    }

    fn labels(verdicts: &[LineVerdict]) -> Vec<bool> {
        verdicts.iter().map(|v| v.is_ai).collect()
    }

    #[test]
    fn test_sandwich_flips_plain_line() {
        let mut lines = vec![ai("const a = 1;"), human("x++"), ai("const b = 2;")];
        apply_sandwich(&mut lines);
        assert!(lines[1].is_ai);
        assert_eq!(lines[1].confidence, SANDWICH_MIN_CONFIDENCE);
        assert_eq!(lines[1].rationale, vec!["seed", SANDWICH_RATIONALE]);
    }

    #[test]
    fn test_sandwich_spares_human_signature() {
        let mut lines = vec![
            ai("const a = 1;"),
            human("foo_bar_hack();"),
            ai("const b = 2;"),
        ];
        apply_sandwich(&mut lines);
        assert!(!lines[1].is_ai);
        assert_eq!(lines[1].rationale, vec!["seed"]);
    }

    #[test]
    fn test_sandwich_skips_blank_lines() {
        let mut lines = vec![
            ai("const a = 1;"),
            LineVerdict::neutral(0, ""),
            human("x++"),
            LineVerdict::neutral(0, "  "),
            ai("const b = 2;"),
        ];
        apply_sandwich(&mut lines);
        assert!(lines[2].is_ai);
        assert!(!lines[1].is_ai);
        assert!(!lines[3].is_ai);
    }

    #[test]
    fn test_sandwich_ignores_edges() {
        let mut lines = vec![human("x++"), ai("const a = 1;"), human("y--")];
        apply_sandwich(&mut lines);
        assert_eq!(labels(&lines), vec![false, true, false]);
    }

    #[test]
    fn test_sandwich_never_lowers_confidence() {
        let mut middle = human("x++");
        middle.confidence = 0.9;
        let mut lines = vec![ai("a();"), middle, ai("b();")];
        apply_sandwich(&mut lines);
        assert!(lines[1].is_ai);
        assert_eq!(lines[1].confidence, 0.9);
    }

    #[test]
    fn test_block_extension_after_run_of_three() {
        let mut lines = vec![
            ai("const userName = getUserName();"),
            ai("const userEmail = getUserEmail();"),
            ai("const userRole = getUserRole();"),
            ai("const userStatus = getUserStatus();"),
            human("x++"),
            ai("const userTeam = getUserTeam();"),
        ];
        extend_blocks(&mut lines);
        assert!(lines[4].is_ai);
        assert_eq!(lines[4].confidence, BLOCK_MIN_CONFIDENCE);
        assert!(lines[4]
            .rationale
            .iter()
            .any(|r| r.contains("Block extension")));
    }

    #[test]
    fn test_block_extension_needs_run_of_three() {
        let mut lines = vec![ai("a();"), ai("b();"), human("x++"), ai("c();")];
        extend_blocks(&mut lines);
        assert_eq!(labels(&lines), vec![true, true, false, true]);
    }

    #[test]
    fn test_block_extension_resets_on_blank() {
        let mut lines = vec![
            ai("a();"),
            ai("b();"),
            ai("c();"),
            LineVerdict::neutral(0, ""),
            human("x++"),
            ai("d();"),
        ];
        extend_blocks(&mut lines);
        assert!(!lines[4].is_ai);
    }

    #[test]
    fn test_block_extension_lookahead_is_two_lines() {
        let mut within = vec![
            ai("a();"),
            ai("b();"),
            ai("c();"),
            human("x++"),
            human("y--"),
            ai("d();"),
        ];
        extend_blocks(&mut within);
        assert_eq!(labels(&within), vec![true; 6]);

        let mut beyond = vec![
            ai("a();"),
            ai("b();"),
            ai("c();"),
            human("x++"),
            human("y--"),
            human("z *= 2"),
            ai("d();"),
        ];
        extend_blocks(&mut beyond);
        assert_eq!(
            labels(&beyond),
            vec![true, true, true, false, false, false, true]
        );
    }

    #[test]
    fn test_block_extension_spares_human_signature() {
        let mut lines = vec![
            ai("a();"),
            ai("b();"),
            ai("c();"),
            human("// TODO: handle retries"),
            ai("d();"),
        ];
        extend_blocks(&mut lines);
        assert!(!lines[3].is_ai);
    }

    #[test]
    fn test_smooth_runs_sandwich_first() {
        let mut lines = vec![
            ai("a();"),
            ai("b();"),
            ai("c();"),
            human("x++"),
            ai("d();"),
        ];
        smooth(&mut lines);
        assert!(lines[3].is_ai);
        assert_eq!(lines[3].rationale, vec!["seed", SANDWICH_RATIONALE]);
    }
}
