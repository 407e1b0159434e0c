//! Heuristic AI-vs-human code classifier
//!
//! Pure pattern matching, no model inference. A file goes through three
//! stages that share one owned buffer of line verdicts:
//!
//! 1. [`line`]: every line scored against the [`rules`] pattern library
//! 2. [`structure`]: a whole-file bias nudges AI-line confidence
//! 3. [`smoothing`]: neighborhood rules revise isolated verdicts
//!
//! The result is folded into a [`FileVerdict`] by [`crate::aggregate`].
//! Classification is deterministic: the same text and language always give
//! the same verdict.

pub mod language;
pub mod line;
pub mod rules;
pub mod smoothing;
pub mod structure;

pub use language::{language_for_extension, language_for_path, normalize_language, UNKNOWN_LANGUAGE};
pub use line::classify_line;
pub use structure::structural_bias;

use crate::aggregate;
use crate::models::{FileVerdict, LineVerdict};

/// Classify a whole text under the given language tag
pub fn classify(text: &str, language: &str) -> FileVerdict {
    let mut verdicts: Vec<LineVerdict> = text
        .lines()
        .enumerate()
        .map(|(i, line)| classify_line(line, i + 1, language))
        .collect();

    let bias = structure::structural_bias(text);
    structure::apply_structural_bias(&mut verdicts, bias);
    smoothing::smooth(&mut verdicts);

    aggregate::file_verdict(language, verdicts)
}

/// Classify a file, taking the language from its path
pub fn classify_path(path: &str, text: &str) -> FileVerdict {
    classify(text, language_for_path(path))
}
