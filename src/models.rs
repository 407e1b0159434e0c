//! Core data models for authorscan
//!
//! These models are shared by the classifier, the repository pipeline and
//! the reporters. Everything serializable is what ends up in `--format json`.

use serde::{Deserialize, Serialize};

/// Which side of the verdict a detection rule votes for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Ai,
    Human,
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Ai => write!(f, "ai"),
            Polarity::Human => write!(f, "human"),
        }
    }
}

/// Confidence assigned to blank lines, which never take part in statistics
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

/// Verdict for a single source line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineVerdict {
    /// 1-based line number (informational only)
    pub line_number: usize,
    /// Original line text, indentation included
    pub content: String,
    pub is_ai: bool,
    /// 0.1..=0.95 for non-blank lines, exactly 0.5 for blank ones
    pub confidence: f64,
    #[serde(default)]
    pub rationale: Vec<String>,
}

impl LineVerdict {
    /// The fixed verdict given to whitespace-only lines
    pub fn neutral(line_number: usize, content: &str) -> Self {
        Self {
            line_number,
            content: content.to_string(),
            is_ai: false,
            confidence: NEUTRAL_CONFIDENCE,
            rationale: Vec::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn label(&self) -> Polarity {
        if self.is_ai {
            Polarity::Ai
        } else {
            Polarity::Human
        }
    }
}

/// Line counts and percentages shared by file and repository verdicts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictStats {
    /// Non-blank lines only
    pub total_lines: usize,
    pub ai_lines: usize,
    pub human_lines: usize,
    pub ai_percentage: f64,
    pub human_percentage: f64,
    pub overall_confidence: f64,
}

impl Default for VerdictStats {
    fn default() -> Self {
        Self {
            total_lines: 0,
            ai_lines: 0,
            human_lines: 0,
            ai_percentage: 0.0,
            human_percentage: 0.0,
            overall_confidence: NEUTRAL_CONFIDENCE,
        }
    }
}

/// Classification result for one file or snippet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileVerdict {
    #[serde(flatten)]
    pub stats: VerdictStats,
    pub language: String,
    pub line_verdicts: Vec<LineVerdict>,
}

/// One analyzed file inside a repository verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub verdict: FileVerdict,
}

/// Outcome of the scaffolding-tool provenance check
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceReport {
    pub tool: String,
    pub detected: bool,
    pub evidence: Vec<String>,
}

/// Repository-wide result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryVerdict {
    /// `owner/repo`
    pub source: String,
    /// Every file the walker reached, analyzable or not
    pub total_files_seen: usize,
    pub files_analyzed: usize,
    pub files: Vec<FileEntry>,
    /// Lines-weighted aggregate across `files`
    pub stats: VerdictStats,
    #[serde(default)]
    pub provenance: Option<ProvenanceReport>,
    /// Soft failures: unreadable subtrees, files that could not be fetched
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Kind of entry in a remote directory listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks, submodules: listed but never followed or analyzed
    Other,
}

/// A file or directory in a remote tree, valid only during traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileHandle {
    /// Path relative to the repository root, `/`-separated
    pub path: String,
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
    /// Raw download URL; directories and some special files have none
    pub download_url: Option<String>,
}

impl RemoteFileHandle {
    pub fn file(path: &str, size: u64) -> Self {
        Self {
            path: path.to_string(),
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            kind: EntryKind::File,
            size,
            download_url: None,
        }
    }

    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = Some(url.into());
        self
    }

    pub fn dir(path: &str) -> Self {
        Self {
            path: path.to_string(),
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            kind: EntryKind::Dir,
            size: 0,
            download_url: None,
        }
    }

    /// Lowercased extension without the dot
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }
}

/// Repository metadata used by the provenance check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub description: Option<String>,
    pub default_branch: Option<String>,
    pub stars: u64,
}

/// One entry from the recent-commit window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author_login: Option<String>,
    pub author_name: String,
    pub author_email: String,
    pub message: String,
}

/// Reported after every file the repository pipeline finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress<'a> {
    pub done: usize,
    pub total: usize,
    pub path: &'a str,
}
