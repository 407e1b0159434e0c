//! Remote repository access
//!
//! The pipeline never talks HTTP directly. It goes through [`RemoteSource`],
//! which has exactly four capabilities: list a directory, download a raw
//! file, read repository metadata, and read recent commits. The first two
//! fail loudly; the last two degrade to `None` / empty because they only
//! feed the provenance check.
//!
//! - [`github`] is the real implementation (GitHub REST API over `ureq`)
//! - `memory` serves a fixed tree from memory for tests
//! - [`walker`] traverses a source and decides which files are worth
//!   classifying

pub mod github;
#[doc(hidden)]
pub mod memory;
pub mod walker;

pub use github::{parse_identifier, GitHubSource};
#[doc(hidden)]
pub use memory::InMemorySource;
pub use walker::{collect_files, is_analyzable, select_analyzable, Traversal};

use crate::error::AnalysisResult;
use crate::models::{CommitRecord, RemoteFileHandle, RepoMetadata};

/// Read-only access to one remote repository.
///
/// Implementations must be `Send + Sync` so sibling subtrees can be listed
/// from rayon's pool while provenance checks run alongside file analysis.
pub trait RemoteSource: Send + Sync {
    /// `owner/repo`
    fn identifier(&self) -> &str;

    /// Entries directly under `path` (`""` is the repository root).
    fn list_directory(&self, path: &str) -> AnalysisResult<Vec<RemoteFileHandle>>;

    /// Raw text behind a handle's download URL.
    fn fetch_raw(&self, url: &str) -> AnalysisResult<String>;

    /// Repository metadata; `None` when it cannot be fetched.
    fn metadata(&self) -> Option<RepoMetadata>;

    /// Up to `limit` most recent commits; empty when they cannot be fetched.
    fn recent_commits(&self, limit: usize) -> Vec<CommitRecord>;
}
