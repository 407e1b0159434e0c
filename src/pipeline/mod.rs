//! Repository analysis pipeline
//!
//! Orchestrates a full repository run:
//! 1. Walk the remote tree
//! 2. Filter to analyzable source files
//! 3. Fetch and classify each file, reporting progress
//! 4. Check scaffolding-tool provenance (alongside step 3)
//! 5. Fold file verdicts into repository statistics

use tracing::{debug, info, warn};

use crate::aggregate::RepositoryAccumulator;
use crate::classifier;
use crate::config::UserConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{FileEntry, FileVerdict, Progress, RemoteFileHandle, RepositoryVerdict};
use crate::provenance;
use crate::remote::{self, GitHubSource, RemoteSource};

/// Called once per attempted file, in traversal order
pub type ProgressFn<'a> = dyn FnMut(Progress<'_>) + Send + 'a;

/// Knobs for one repository run
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Directory to start from, `""` for the repository root
    pub start_path: String,
    pub max_depth: usize,
    pub commit_window: usize,
    pub provenance: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            start_path: String::new(),
            max_depth: remote::walker::DEFAULT_MAX_DEPTH,
            commit_window: provenance::DEFAULT_COMMIT_WINDOW,
            provenance: true,
        }
    }
}

impl AnalysisOptions {
    /// Defaults taken from the `[analysis]` section of the user config
    pub fn from_config(config: &UserConfig) -> Self {
        Self {
            start_path: String::new(),
            max_depth: config.analysis.max_depth(),
            commit_window: config.analysis.commit_window(),
            provenance: config.analysis.provenance(),
        }
    }
}

/// Classify a standalone snippet
pub fn analyze_snippet(text: &str, language: &str) -> FileVerdict {
    classifier::classify(text, language)
}

/// Analyze a GitHub repository given its URL or `owner/repo`
pub fn analyze_repository(
    identifier: &str,
    config: &UserConfig,
    options: &AnalysisOptions,
    progress: Option<&mut ProgressFn<'_>>,
) -> AnalysisResult<RepositoryVerdict> {
    let source = GitHubSource::from_identifier(identifier, &config.github)?;
    analyze_source(&source, options, progress)
}

/// Analyze any remote source
pub fn analyze_source(
    source: &dyn RemoteSource,
    options: &AnalysisOptions,
    progress: Option<&mut ProgressFn<'_>>,
) -> AnalysisResult<RepositoryVerdict> {
    info!("Analyzing {}", source.identifier());

    let traversal = remote::collect_files(source, &options.start_path, options.max_depth)?;
    let candidates = remote::select_analyzable(&traversal.files);
    info!(
        "{} files found, {} analyzable",
        traversal.files.len(),
        candidates.len()
    );
    if candidates.is_empty() {
        return Err(AnalysisError::NoAnalyzableFiles {
            source_id: source.identifier().to_string(),
        });
    }

    let (outcome, provenance) = rayon::join(
        || analyze_files(source, &candidates, progress),
        || {
            options
                .provenance
                .then(|| provenance::detect(source, &traversal.files, options.commit_window))
        },
    );

    let mut warnings = traversal.warnings;
    warnings.extend(outcome.warnings);

    Ok(RepositoryVerdict {
        source: source.identifier().to_string(),
        total_files_seen: traversal.files.len(),
        files_analyzed: outcome.accumulator.files(),
        stats: outcome.accumulator.stats(),
        files: outcome.files,
        provenance,
        warnings,
    })
}

struct FilesOutcome {
    files: Vec<FileEntry>,
    accumulator: RepositoryAccumulator,
    warnings: Vec<String>,
}

/// Files are fetched one at a time; the callback sees them in traversal
/// order and returns before the next fetch starts
fn analyze_files(
    source: &dyn RemoteSource,
    candidates: &[&RemoteFileHandle],
    mut progress: Option<&mut ProgressFn<'_>>,
) -> FilesOutcome {
    let total = candidates.len();
    let mut outcome = FilesOutcome {
        files: Vec::with_capacity(total),
        accumulator: RepositoryAccumulator::new(),
        warnings: Vec::new(),
    };

    for (i, handle) in candidates.iter().enumerate() {
        match fetch_and_classify(source, handle) {
            Ok(verdict) => {
                debug!(
                    "{}: {:.1}% AI over {} lines",
                    handle.path, verdict.stats.ai_percentage, verdict.stats.total_lines
                );
                outcome.accumulator.add(&verdict);
                outcome.files.push(FileEntry {
                    path: handle.path.clone(),
                    verdict,
                });
            }
            Err(e) => {
                warn!("Skipping {}: {}", handle.path, e);
                outcome.warnings.push(format!("{}: {}", handle.path, e));
            }
        }

        if let Some(callback) = progress.as_deref_mut() {
            callback(Progress {
                done: i + 1,
                total,
                path: &handle.path,
            });
        }
    }
    outcome
}

fn fetch_and_classify(
    source: &dyn RemoteSource,
    handle: &RemoteFileHandle,
) -> AnalysisResult<FileVerdict> {
    let url = handle
        .download_url
        .as_deref()
        .ok_or_else(|| AnalysisError::RemoteFetch {
            reference: handle.path.clone(),
            reason: "no download URL".to_string(),
        })?;
    let text = source.fetch_raw(url)?;
    Ok(classifier::classify_path(&handle.path, &text))
}
