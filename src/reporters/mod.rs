//! Output reporters for authorscan results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::models::{FileVerdict, RepositoryVerdict};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a single-file verdict. `show_lines` adds the per-line table to
/// text output; JSON always carries every line verdict.
pub fn render_file(verdict: &FileVerdict, format: OutputFormat, show_lines: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_file(verdict, show_lines)),
        OutputFormat::Json => json::render(verdict),
    }
}

/// Render a repository verdict. `top` caps the per-file ranking in text
/// output.
pub fn render_repository(
    verdict: &RepositoryVerdict,
    format: OutputFormat,
    top: usize,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_repository(verdict, top)),
        OutputFormat::Json => json::render(verdict),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::aggregate::RepositoryAccumulator;
    use crate::classifier;
    use crate::models::{FileEntry, ProvenanceReport};

    pub(crate) const SAMPLE: &str = "export const formatUserName = (user: User): string => {\n  return `${user.firstName} ${user.lastName}`;\n};\n\n// quick hack lol\nvar tmp = foo(1,2)\n";

    pub(crate) fn test_file_verdict() -> FileVerdict {
        classifier::classify(SAMPLE, "typescript")
    }

    /// Two files plus a detected provenance report
    pub(crate) fn test_repository_verdict() -> RepositoryVerdict {
        let files = vec![
            FileEntry {
                path: "src/lib/format.ts".into(),
                verdict: test_file_verdict(),
            },
            FileEntry {
                path: "scripts/seed.py".into(),
                verdict: classifier::classify("x = 1\nprint(x)  # lol\n", "python"),
            },
        ];
        let mut acc = RepositoryAccumulator::new();
        for entry in &files {
            acc.add(&entry.verdict);
        }
        RepositoryVerdict {
            source: "acme/widgets".into(),
            total_files_seen: 9,
            files_analyzed: acc.files(),
            stats: acc.stats(),
            files,
            provenance: Some(ProvenanceReport {
                tool: "Lovable".into(),
                detected: true,
                evidence: vec!["1 of the last 3 commits authored by the Lovable bot".into()],
            }),
            warnings: vec!["Failed to list 'lib': HTTP 500: boom".into()],
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("sarif".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_dispatch() {
        let file = test_file_verdict();
        let text = render_file(&file, OutputFormat::Text, false).unwrap();
        assert!(text.contains("AI"));
        let json = render_file(&file, OutputFormat::Json, false).unwrap();
        assert!(json.trim_start().starts_with('{'));

        let repo = test_repository_verdict();
        assert!(render_repository(&repo, OutputFormat::Text, 5)
            .unwrap()
            .contains("acme/widgets"));
        assert!(render_repository(&repo, OutputFormat::Json, 5)
            .unwrap()
            .contains("\"files_analyzed\": 2"));
    }
}
