//! Configuration module for authorscan
//!
//! This module handles:
//! - GitHub access settings (token, API URL, timeout)
//! - Analysis defaults (walk depth, commit window, provenance)
//!
//! CLI flags override both.

mod user_config;

pub use user_config::{AnalysisSettings, GitHubSettings, UserConfig};
