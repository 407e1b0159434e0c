//! Error taxonomy for repository analysis
//!
//! Only three conditions are fatal to a run: an unparseable repository
//! identifier, a failed root listing, and a filter that leaves nothing to
//! analyze. Every other remote failure is absorbed where it happens and
//! surfaces as a warning on the final verdict.

use thiserror::Error;

/// Errors that can occur while analyzing a remote repository
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid repository identifier '{0}'. Expected https://github.com/<owner>/<repo> or <owner>/<repo>")]
    InvalidSourceIdentifier(String),

    #[error("Failed to list '{path}': {reason}")]
    RemoteList { path: String, reason: String },

    #[error("Failed to fetch '{reference}': {reason}")]
    RemoteFetch { reference: String, reason: String },

    #[error("No analyzable source files found in {source_id}")]
    NoAnalyzableFiles { source_id: String },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
