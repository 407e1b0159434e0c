//! Scaffolding-tool provenance
//!
//! Some repositories are generated wholesale by an app builder and then
//! pushed to GitHub by the tool's bot. Those leave fingerprints outside the
//! code itself: the repo description, bot-authored commits, a fixed set of
//! scaffold files and a large vendored UI component directory.
//!
//! Each fingerprint is an independent indicator. A repository is attributed
//! to the tool when at least two indicators fire, or when any recent commit
//! comes from the tool's bot account. Every check is best-effort; a failed
//! request just means that indicator stays silent.

use crate::models::{CommitRecord, EntryKind, ProvenanceReport, RemoteFileHandle};
use crate::remote::RemoteSource;
use std::collections::HashSet;
use tracing::{debug, info};

pub const DEFAULT_COMMIT_WINDOW: usize = 30;

/// Indicators needed without a bot-authored commit
const DETECTION_THRESHOLD: usize = 2;

/// Fingerprints of one app-builder tool
#[derive(Debug, Clone, Copy)]
pub struct ToolProfile {
    pub name: &'static str,
    /// Lowercase names the tool goes by
    pub aliases: &'static [&'static str],
    pub bot_logins: &'static [&'static str],
    /// Lowercase phrases found in the tool's commit messages
    pub commit_markers: &'static [&'static str],
    pub marker_files: &'static [&'static str],
    /// Indicator fires when strictly more marker files are present
    pub marker_file_threshold: usize,
    pub ui_components_dir: &'static str,
    /// Indicator fires when strictly more files sit in `ui_components_dir`
    pub ui_component_threshold: usize,
    /// Files whose content is searched for an alias
    pub content_files: &'static [&'static str],
}

/// Lovable, formerly GPT Engineer
pub const LOVABLE: ToolProfile = ToolProfile {
    name: "Lovable",
    aliases: &["lovable", "gpt-engineer", "gpt engineer", "gptengineer"],
    bot_logins: &["gpt-engineer-app[bot]", "lovable-dev[bot]"],
    commit_markers: &[
        "lovable",
        "gpt-engineer",
        "gpt engineer",
        "vite_react_shadcn_ts",
    ],
    marker_files: &[
        "package.json",
        "bun.lockb",
        "components.json",
        "vite.config.ts",
        "tailwind.config.ts",
        "postcss.config.js",
        "eslint.config.js",
        "index.html",
        "src/pages/Index.tsx",
    ],
    marker_file_threshold: 4,
    ui_components_dir: "src/components/ui",
    ui_component_threshold: 10,
    content_files: &["src/pages/Index.tsx", "package.json", "README.md"],
};

impl ToolProfile {
    fn mentions_tool(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.aliases.iter().any(|alias| lower.contains(alias))
    }

    fn is_bot_commit(&self, commit: &CommitRecord) -> bool {
        self.bot_logins.iter().any(|bot| {
            commit
                .author_login
                .as_deref()
                .is_some_and(|login| login.eq_ignore_ascii_case(bot))
                || commit.author_name.eq_ignore_ascii_case(bot)
                || commit.author_email.to_lowercase().contains(bot)
        })
    }

    fn is_marked_commit(&self, commit: &CommitRecord) -> bool {
        let message = commit.message.to_lowercase();
        self.commit_markers.iter().any(|m| message.contains(m))
    }
}

/// Check a repository against the built-in tool profile
pub fn detect(
    source: &dyn RemoteSource,
    files: &[RemoteFileHandle],
    commit_window: usize,
) -> ProvenanceReport {
    detect_tool(source, files, commit_window, &LOVABLE)
}

/// Check a repository against one tool profile.
///
/// `files` is the walker's full file list, analyzable or not.
pub fn detect_tool(
    source: &dyn RemoteSource,
    files: &[RemoteFileHandle],
    commit_window: usize,
    profile: &ToolProfile,
) -> ProvenanceReport {
    let mut evidence = Vec::new();

    if let Some(description) = source.metadata().and_then(|m| m.description) {
        if profile.mentions_tool(&description) {
            evidence.push(format!("Repository description mentions {}", profile.name));
        }
    }

    let commits = source.recent_commits(commit_window);
    let bot_commits = commits.iter().filter(|c| profile.is_bot_commit(c)).count();
    if bot_commits > 0 {
        evidence.push(format!(
            "{} of the last {} commits authored by the {} bot",
            bot_commits,
            commits.len(),
            profile.name
        ));
    }
    let marked_commits = commits.iter().filter(|c| profile.is_marked_commit(c)).count();
    if marked_commits > 0 {
        evidence.push(format!(
            "{} commit messages reference {}",
            marked_commits, profile.name
        ));
    }

    let present: HashSet<&str> = files.iter().map(|f| f.path.as_str()).collect();
    let markers = profile
        .marker_files
        .iter()
        .filter(|m| present.contains(**m))
        .count();
    if markers > profile.marker_file_threshold {
        evidence.push(format!(
            "{} of {} {} scaffold files present",
            markers,
            profile.marker_files.len(),
            profile.name
        ));
    }

    let ui_components = count_ui_components(source, files, profile);
    if ui_components > profile.ui_component_threshold {
        evidence.push(format!(
            "{} generated components under {}",
            ui_components, profile.ui_components_dir
        ));
    }

    let mentioning = files_mentioning_tool(source, files, profile);
    if !mentioning.is_empty() {
        evidence.push(format!(
            "{} referenced in {}",
            profile.name,
            mentioning.join(", ")
        ));
    }

    let detected = bot_commits > 0 || evidence.len() >= DETECTION_THRESHOLD;
    if detected {
        info!(
            "{} looks scaffolded by {} ({} indicators)",
            source.identifier(),
            profile.name,
            evidence.len()
        );
    } else {
        debug!(
            "{}: {} provenance indicators for {}",
            source.identifier(),
            evidence.len(),
            profile.name
        );
    }

    ProvenanceReport {
        tool: profile.name.to_string(),
        detected,
        evidence,
    }
}

/// The walker prunes the components directory, so list it directly when
/// the gathered files do not already cover it
fn count_ui_components(
    source: &dyn RemoteSource,
    files: &[RemoteFileHandle],
    profile: &ToolProfile,
) -> usize {
    let prefix = format!("{}/", profile.ui_components_dir);
    let gathered = files.iter().filter(|f| f.path.starts_with(&prefix)).count();
    if gathered > 0 {
        return gathered;
    }
    match source.list_directory(profile.ui_components_dir) {
        Ok(entries) => entries
            .iter()
            .filter(|e| e.kind == EntryKind::File)
            .count(),
        Err(e) => {
            debug!("No component directory: {}", e);
            0
        }
    }
}

fn files_mentioning_tool(
    source: &dyn RemoteSource,
    files: &[RemoteFileHandle],
    profile: &ToolProfile,
) -> Vec<String> {
    profile
        .content_files
        .iter()
        .filter_map(|wanted| files.iter().find(|f| f.path == *wanted))
        .filter_map(|handle| {
            let url = handle.download_url.as_deref()?;
            match source.fetch_raw(url) {
                Ok(text) => profile.mentions_tool(&text).then(|| handle.path.clone()),
                Err(e) => {
                    debug!("Provenance fetch skipped: {}", e);
                    None
                }
            }
        })
        .collect()
}
