//! In-memory remote source
//!
//! Serves a fixed set of `(path, content)` pairs as if they were a remote
//! repository. Directories are implied by the paths. Individual directories
//! and files can be marked as failing to exercise the pipeline's soft-failure
//! handling, and every listing request is recorded.
//!
//! Test support only. It is public so the integration tests under `tests/`
//! can reach it, and hidden from the documented API.

use super::RemoteSource;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{CommitRecord, RemoteFileHandle, RepoMetadata};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Mutex;

const URL_SCHEME: &str = "memory://";

#[derive(Debug, Default)]
pub struct InMemorySource {
    identifier: String,
    files: BTreeMap<String, String>,
    failing_dirs: HashSet<String>,
    failing_files: HashSet<String>,
    metadata: Option<RepoMetadata>,
    commits: Vec<CommitRecord>,
    listed: Mutex<Vec<String>>,
}

impl InMemorySource {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Default::default()
        }
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    /// Listing this directory fails
    pub fn with_failing_dir(mut self, path: &str) -> Self {
        self.failing_dirs.insert(path.to_string());
        self
    }

    /// Downloading this file fails
    pub fn with_failing_file(mut self, path: &str) -> Self {
        self.failing_files.insert(path.to_string());
        self
    }

    pub fn with_metadata(mut self, metadata: RepoMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_commit(mut self, commit: CommitRecord) -> Self {
        self.commits.push(commit);
        self
    }

    /// Every path passed to `list_directory`, in call order
    pub fn listed_paths(&self) -> Vec<String> {
        self.listed
            .lock()
            .map(|listed| listed.clone())
            .unwrap_or_default()
    }
}

impl RemoteSource for InMemorySource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn list_directory(&self, path: &str) -> AnalysisResult<Vec<RemoteFileHandle>> {
        if let Ok(mut listed) = self.listed.lock() {
            listed.push(path.to_string());
        }
        if self.failing_dirs.contains(path) {
            return Err(AnalysisError::RemoteList {
                path: path.to_string(),
                reason: "HTTP 500: simulated failure".to_string(),
            });
        }

        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };

        let mut dirs = BTreeSet::new();
        let mut entries = Vec::new();
        for (file_path, content) in &self.files {
            let Some(rest) = file_path.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    dirs.insert(format!("{prefix}{dir}"));
                }
                None => entries.push(
                    RemoteFileHandle::file(file_path, content.len() as u64)
                        .with_download_url(format!("{URL_SCHEME}{file_path}")),
                ),
            }
        }

        if entries.is_empty() && dirs.is_empty() && !path.is_empty() {
            return Err(AnalysisError::RemoteList {
                path: path.to_string(),
                reason: "HTTP 404: Not Found".to_string(),
            });
        }

        entries.extend(dirs.iter().map(|d| RemoteFileHandle::dir(d)));
        Ok(entries)
    }

    fn fetch_raw(&self, url: &str) -> AnalysisResult<String> {
        let path = url.strip_prefix(URL_SCHEME).unwrap_or(url);
        let failure = |reason: &str| AnalysisError::RemoteFetch {
            reference: url.to_string(),
            reason: reason.to_string(),
        };
        if self.failing_files.contains(path) {
            return Err(failure("HTTP 503: simulated failure"));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| failure("HTTP 404: Not Found"))
    }

    fn metadata(&self) -> Option<RepoMetadata> {
        self.metadata.clone()
    }

    fn recent_commits(&self, limit: usize) -> Vec<CommitRecord> {
        self.commits.iter().take(limit).cloned().collect()
    }
}
