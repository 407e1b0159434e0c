//! authorscan - heuristic AI-authorship estimation for source code
//!
//! Classifies code line by line as AI-generated or human-written using
//! pattern heuristics, then aggregates the verdicts per file and across a
//! remote repository.
//!
//! ```no_run
//! let verdict = authorscan::classify("const a = 1;\n", "javascript");
//! println!("{:.1}% AI", verdict.stats.ai_percentage);
//! ```

pub mod aggregate;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod provenance;
pub mod remote;
pub mod reporters;

pub use classifier::classify;
pub use error::{AnalysisError, AnalysisResult};
pub use pipeline::{analyze_repository, analyze_source, AnalysisOptions};
pub use remote::RemoteSource;
