//! Folding line verdicts into file and repository statistics
//!
//! File stats are plain counts over non-blank lines. Repository stats sum
//! line counts across files, so a 2,000-line file weighs more than a
//! 20-line one, while confidence is averaged per analyzed file.

use crate::models::{FileVerdict, LineVerdict, VerdictStats, NEUTRAL_CONFIDENCE};

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn stats_from_counts(ai_lines: usize, human_lines: usize, overall_confidence: f64) -> VerdictStats {
    let total_lines = ai_lines + human_lines;
    VerdictStats {
        total_lines,
        ai_lines,
        human_lines,
        ai_percentage: percentage(ai_lines, total_lines),
        human_percentage: percentage(human_lines, total_lines),
        overall_confidence,
    }
}

/// Stats over the non-blank lines of one file
pub fn line_stats(lines: &[LineVerdict]) -> VerdictStats {
    let counted: Vec<&LineVerdict> = lines.iter().filter(|v| !v.is_blank()).collect();
    let ai_lines = counted.iter().filter(|v| v.is_ai).count();
    let human_lines = counted.len() - ai_lines;
    let overall_confidence = if counted.is_empty() {
        NEUTRAL_CONFIDENCE
    } else {
        counted.iter().map(|v| v.confidence).sum::<f64>() / counted.len() as f64
    };
    stats_from_counts(ai_lines, human_lines, overall_confidence)
}

/// Build the immutable file verdict from its final line verdicts
pub fn file_verdict(language: &str, line_verdicts: Vec<LineVerdict>) -> FileVerdict {
    FileVerdict {
        stats: line_stats(&line_verdicts),
        language: language.to_string(),
        line_verdicts,
    }
}

/// Running totals for a repository, fed one file at a time
#[derive(Debug, Default, Clone)]
pub struct RepositoryAccumulator {
    ai_lines: usize,
    human_lines: usize,
    confidence_sum: f64,
    files: usize,
}

impl RepositoryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, verdict: &FileVerdict) {
        self.ai_lines += verdict.stats.ai_lines;
        self.human_lines += verdict.stats.human_lines;
        self.confidence_sum += verdict.stats.overall_confidence;
        self.files += 1;
    }

    pub fn files(&self) -> usize {
        self.files
    }

    pub fn stats(&self) -> VerdictStats {
        let overall_confidence = if self.files == 0 {
            NEUTRAL_CONFIDENCE
        } else {
            self.confidence_sum / self.files as f64
        };
        stats_from_counts(self.ai_lines, self.human_lines, overall_confidence)
    }
}
