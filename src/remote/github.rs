//! GitHub REST API source
//!
//! Sync HTTP via ureq (no async runtime). Uses the contents API for
//! listings, `download_url` for raw text, and the repo / commits endpoints
//! for provenance. Unauthenticated access works but is rate limited to 60
//! requests an hour; set `GITHUB_TOKEN` or `[github] token` for more.

use super::RemoteSource;
use crate::config::GitHubSettings;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{CommitRecord, EntryKind, RemoteFileHandle, RepoMetadata};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::debug;

const USER_AGENT: &str = concat!("authorscan/", env!("CARGO_PKG_VERSION"));
const API_ACCEPT: &str = "application/vnd.github+json";

static URL_PATTERN: OnceLock<Regex> = OnceLock::new();
static SSH_PATTERN: OnceLock<Regex> = OnceLock::new();
static SHORTHAND_PATTERN: OnceLock<Regex> = OnceLock::new();

fn url_pattern() -> &'static Regex {
    URL_PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:https?://)?(?:www\.)?github\.com/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?(?:[/?#].*)?$",
        )
        .expect("valid regex")
    })
}

fn ssh_pattern() -> &'static Regex {
    SSH_PATTERN.get_or_init(|| {
        Regex::new(r"^(?:ssh://)?git@github\.com[:/]([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$")
            .expect("valid regex")
    })
}

fn shorthand_pattern() -> &'static Regex {
    SHORTHAND_PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?$").expect("valid regex")
    })
}

/// Split a repository URL or `owner/repo` shorthand into its two parts
pub fn parse_identifier(input: &str) -> AnalysisResult<(String, String)> {
    let trimmed = input.trim().trim_end_matches('/');
    let captures = url_pattern()
        .captures(trimmed)
        .or_else(|| ssh_pattern().captures(trimmed))
        .or_else(|| shorthand_pattern().captures(trimmed))
        .ok_or_else(|| AnalysisError::InvalidSourceIdentifier(input.to_string()))?;

    let owner = &captures[1];
    let repo = &captures[2];
    if [owner, repo].iter().any(|part| part.chars().all(|c| c == '.')) {
        return Err(AnalysisError::InvalidSourceIdentifier(input.to_string()));
    }
    Ok((owner.to_string(), repo.to_string()))
}

#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    size: u64,
    download_url: Option<String>,
}

impl From<ContentEntry> for RemoteFileHandle {
    fn from(entry: ContentEntry) -> Self {
        let kind = match entry.kind.as_str() {
            "file" => EntryKind::File,
            "dir" => EntryKind::Dir,
            _ => EntryKind::Other,
        };
        RemoteFileHandle {
            path: entry.path,
            name: entry.name,
            kind,
            size: entry.size,
            download_url: entry.download_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    description: Option<String>,
    default_branch: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    commit: CommitDetail,
    author: Option<AccountRef>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: Option<GitPerson>,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct GitPerson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
struct AccountRef {
    login: String,
}

impl From<CommitEntry> for CommitRecord {
    fn from(entry: CommitEntry) -> Self {
        let person = entry.commit.author.unwrap_or_default();
        CommitRecord {
            author_login: entry.author.map(|a| a.login),
            author_name: person.name,
            author_email: person.email,
            message: entry.commit.message,
        }
    }
}

/// Percent-encode the characters that break a contents API path
fn encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '%' => out.push_str("%25"),
            _ => out.push(c),
        }
    }
    out
}

/// Keep error bodies readable in warnings
fn summarize_body(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    body.lines().next().unwrap_or("").chars().take(200).collect()
}

pub struct GitHubSource {
    owner: String,
    repo: String,
    identifier: String,
    api_url: String,
    token: Option<String>,
    agent: ureq::Agent,
}

impl GitHubSource {
    pub fn new(owner: &str, repo: &str, settings: &GitHubSettings) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(settings.timeout()))
            .build()
            .new_agent();
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            identifier: format!("{owner}/{repo}"),
            api_url: settings.api_url().trim_end_matches('/').to_string(),
            token: settings.token().map(str::to_string),
            agent,
        }
    }

    /// Build a source from a URL or `owner/repo`
    pub fn from_identifier(identifier: &str, settings: &GitHubSettings) -> AnalysisResult<Self> {
        let (owner, repo) = parse_identifier(identifier)?;
        Ok(Self::new(&owner, &repo, settings))
    }

    fn repo_url(&self, suffix: &str) -> String {
        format!("{}/repos/{}/{}{}", self.api_url, self.owner, self.repo, suffix)
    }

    /// GET with the standard headers; non-2xx becomes an error string
    fn get(
        &self,
        url: &str,
        accept: Option<&str>,
    ) -> Result<ureq::http::Response<ureq::Body>, String> {
        let mut req = self.agent.get(url).header("User-Agent", USER_AGENT);
        if let Some(accept) = accept {
            req = req.header("Accept", accept);
        }
        if let Some(token) = &self.token {
            req = req.header("Authorization", &format!("Bearer {}", token));
        }

        let response = req.call().map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let error_text = response.into_body().read_to_string().unwrap_or_default();
            return Err(format!("HTTP {}: {}", status, summarize_body(&error_text)));
        }
        Ok(response)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        self.get(url, Some(API_ACCEPT))?
            .into_body()
            .read_json::<T>()
            .map_err(|e| format!("invalid response: {}", e))
    }
}

impl RemoteSource for GitHubSource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn list_directory(&self, path: &str) -> AnalysisResult<Vec<RemoteFileHandle>> {
        let url = self.repo_url(&format!("/contents/{}", encode_path(path)));
        debug!("Listing {}", url);
        let entries: Vec<ContentEntry> =
            self.get_json(&url).map_err(|reason| AnalysisError::RemoteList {
                path: if path.is_empty() { "/".to_string() } else { path.to_string() },
                reason,
            })?;
        Ok(entries.into_iter().map(RemoteFileHandle::from).collect())
    }

    fn fetch_raw(&self, url: &str) -> AnalysisResult<String> {
        let failure = |reason: String| AnalysisError::RemoteFetch {
            reference: url.to_string(),
            reason,
        };
        self.get(url, None)
            .map_err(failure)?
            .into_body()
            .read_to_string()
            .map_err(|e| failure(e.to_string()))
    }

    fn metadata(&self) -> Option<RepoMetadata> {
        match self.get_json::<RepoResponse>(&self.repo_url("")) {
            Ok(repo) => Some(RepoMetadata {
                description: repo.description,
                default_branch: repo.default_branch,
                stars: repo.stargazers_count,
            }),
            Err(e) => {
                debug!("Repository metadata unavailable for {}: {}", self.identifier, e);
                None
            }
        }
    }

    fn recent_commits(&self, limit: usize) -> Vec<CommitRecord> {
        if limit == 0 {
            return Vec::new();
        }
        let url = self.repo_url(&format!("/commits?per_page={}", limit.min(100)));
        match self.get_json::<Vec<CommitEntry>>(&url) {
            Ok(entries) => entries.into_iter().take(limit).map(CommitRecord::from).collect(),
            Err(e) => {
                debug!("Commit history unavailable for {}: {}", self.identifier, e);
                Vec::new()
            }
        }
    }
}
