//! `authorscan repo` - analyze a GitHub repository

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::config::UserConfig;
use crate::models::Progress;
use crate::pipeline::{self, AnalysisOptions};
use crate::reporters::{self, OutputFormat};

/// Flags that override the `[analysis]` config section
pub(super) struct RepoArgs {
    pub max_depth: Option<usize>,
    pub start_path: Option<String>,
    pub no_provenance: bool,
    pub top: usize,
}

impl RepoArgs {
    fn options(&self, config: &UserConfig) -> AnalysisOptions {
        let mut options = AnalysisOptions::from_config(config);
        if let Some(depth) = self.max_depth {
            options.max_depth = depth;
        }
        if let Some(path) = &self.start_path {
            options.start_path = path.trim_matches('/').to_string();
        }
        if self.no_provenance {
            options.provenance = false;
        }
        options
    }
}

/// Create spinner progress style
fn create_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .expect("valid template")
}

/// Create bar progress style
fn create_bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .expect("valid template")
        .progress_chars("█▓▒░  ")
}

pub(super) fn run(url: &str, args: RepoArgs, format: OutputFormat) -> Result<()> {
    let config = UserConfig::load()?;
    let options = args.options(&config);

    let bar = if format == OutputFormat::Text {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    bar.set_style(create_spinner_style());
    bar.set_message(format!("Walking {}...", url));
    bar.enable_steady_tick(Duration::from_millis(100));

    let ticker = bar.clone();
    let mut on_progress = move |p: Progress<'_>| {
        if p.done == 1 {
            ticker.set_style(create_bar_style());
            ticker.set_length(p.total as u64);
        }
        ticker.set_position(p.done as u64);
        ticker.set_message(p.path.to_string());
    };

    let result = pipeline::analyze_repository(url, &config, &options, Some(&mut on_progress));
    bar.finish_and_clear();
    let verdict = result.with_context(|| format!("Analysis of {} failed", url))?;

    if format == OutputFormat::Text {
        eprintln!(
            "{}Analyzed {} of {} files in {}",
            style("✓ ").green(),
            style(verdict.files_analyzed).cyan(),
            style(verdict.total_files_seen).dim(),
            style(&verdict.source).cyan()
        );
    }
    print!("{}", reporters::render_repository(&verdict, format, args.top)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisSettings;

    #[test]
    fn test_flags_override_config() {
        let config = UserConfig {
            analysis: AnalysisSettings {
                max_depth: Some(6),
                provenance: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };

        let args = RepoArgs {
            max_depth: Some(2),
            start_path: Some("/packages/core/".into()),
            no_provenance: true,
            top: 10,
        };
        let options = args.options(&config);
        assert_eq!(options.max_depth, 2);
        assert_eq!(options.start_path, "packages/core");
        assert!(!options.provenance);

        let defaults = RepoArgs {
            max_depth: None,
            start_path: None,
            no_provenance: false,
            top: 10,
        }
        .options(&config);
        assert_eq!(defaults.max_depth, 6);
        assert!(defaults.provenance);
        assert_eq!(defaults.commit_window, 30);
    }
}
