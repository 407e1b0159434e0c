//! Text (terminal) reporter with colors and formatting

use crate::models::{FileEntry, FileVerdict, Polarity, RepositoryVerdict, VerdictStats};

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const AI_COLOR: &str = "\x1b[35m"; // Magenta
const HUMAN_COLOR: &str = "\x1b[36m"; // Cyan
const ALERT: &str = "\x1b[33m"; // Yellow

const BAR_WIDTH: usize = 30;
const WARNINGS_SHOWN: usize = 5;

/// Color by how much of the code looks generated
fn share_color(ai_percentage: f64) -> &'static str {
    if ai_percentage >= 75.0 {
        "\x1b[31m" // Red
    } else if ai_percentage >= 50.0 {
        "\x1b[91m" // Light red
    } else if ai_percentage >= 25.0 {
        "\x1b[33m" // Yellow
    } else {
        "\x1b[32m" // Green
    }
}

fn share_bar(stats: &VerdictStats) -> String {
    let filled = ((stats.ai_percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "{AI_COLOR}{}{HUMAN_COLOR}{}{RESET}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    )
}

fn summary(out: &mut String, stats: &VerdictStats) {
    let color = share_color(stats.ai_percentage);
    out.push_str(&format!(
        "AI: {color}{BOLD}{:.1}%{RESET} ({} lines)  Human: {BOLD}{:.1}%{RESET} ({} lines)  Confidence: {:.2}\n",
        stats.ai_percentage,
        stats.ai_lines,
        stats.human_percentage,
        stats.human_lines,
        stats.overall_confidence
    ));
    out.push_str(&format!("{}\n", share_bar(stats)));
}

fn rule(out: &mut String) {
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
}

/// Render a single-file verdict
pub fn render_file(verdict: &FileVerdict, show_lines: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{BOLD}authorscan{RESET} {DIM}({}, {} non-blank lines){RESET}\n",
        verdict.language, verdict.stats.total_lines
    ));
    rule(&mut out);
    summary(&mut out, &verdict.stats);

    if show_lines && !verdict.line_verdicts.is_empty() {
        out.push('\n');
        for line in &verdict.line_verdicts {
            if line.is_blank() {
                out.push_str(&format!("{DIM}{:>5}{RESET}\n", line.line_number));
                continue;
            }
            let (color, tag) = match line.label() {
                Polarity::Ai => (AI_COLOR, "AI"),
                Polarity::Human => (HUMAN_COLOR, "HU"),
            };
            out.push_str(&format!(
                "{DIM}{:>5}{RESET} {color}{tag} {:.2}{RESET} │ {}\n",
                line.line_number, line.confidence, line.content
            ));
            if !line.rationale.is_empty() {
                out.push_str(&format!(
                    "{DIM}{:>14} {}{RESET}\n",
                    "",
                    line.rationale.join("; ")
                ));
            }
        }
    }

    out
}

/// Files ranked by AI share, largest first; ties keep path order
fn ranked(files: &[FileEntry]) -> Vec<&FileEntry> {
    let mut ranked: Vec<&FileEntry> = files.iter().collect();
    ranked.sort_by(|a, b| {
        b.verdict
            .stats
            .ai_percentage
            .total_cmp(&a.verdict.stats.ai_percentage)
            .then_with(|| a.path.cmp(&b.path))
    });
    ranked
}

/// Render a repository verdict with the `top` most AI-heavy files
pub fn render_repository(verdict: &RepositoryVerdict, top: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{BOLD}authorscan{RESET} {}\n",
        verdict.source
    ));
    rule(&mut out);
    out.push_str(&format!(
        "Files: {} seen, {} analyzed  Lines: {}\n",
        verdict.total_files_seen, verdict.files_analyzed, verdict.stats.total_lines
    ));
    summary(&mut out, &verdict.stats);

    if let Some(provenance) = &verdict.provenance {
        out.push('\n');
        if provenance.detected {
            out.push_str(&format!(
                "{ALERT}{BOLD}PROVENANCE{RESET} Likely scaffolded with {BOLD}{}{RESET}\n",
                provenance.tool
            ));
        } else {
            out.push_str(&format!(
                "{BOLD}PROVENANCE{RESET} {DIM}No sign of {}{RESET}\n",
                provenance.tool
            ));
        }
        for evidence in &provenance.evidence {
            out.push_str(&format!("  - {}\n", evidence));
        }
    }

    if top > 0 && !verdict.files.is_empty() {
        out.push_str(&format!("\n{BOLD}FILES{RESET} (by AI share)\n"));
        let ranked = ranked(&verdict.files);
        for entry in ranked.iter().take(top) {
            let stats = &entry.verdict.stats;
            let color = share_color(stats.ai_percentage);
            out.push_str(&format!(
                "  {color}{:>5.1}%{RESET}  {:>5} lines  {}\n",
                stats.ai_percentage, stats.total_lines, entry.path
            ));
        }
        if ranked.len() > top {
            out.push_str(&format!(
                "  {DIM}... and {} more{RESET}\n",
                ranked.len() - top
            ));
        }
    }

    if !verdict.warnings.is_empty() {
        out.push_str(&format!(
            "\n{ALERT}{BOLD}WARNINGS{RESET} ({})\n",
            verdict.warnings.len()
        ));
        for warning in verdict.warnings.iter().take(WARNINGS_SHOWN) {
            out.push_str(&format!("  {DIM}{}{RESET}\n", warning));
        }
        if verdict.warnings.len() > WARNINGS_SHOWN {
            out.push_str(&format!(
                "  {DIM}... and {} more{RESET}\n",
                verdict.warnings.len() - WARNINGS_SHOWN
            ));
        }
    }

    out
}
