//! Depth-bounded traversal of a remote tree
//!
//! Dependency, build and tooling directories are never listed. Sibling
//! subtrees are listed on rayon's pool; the merged output keeps listing
//! order. Only the root listing may fail the whole traversal.

use super::RemoteSource;
use crate::error::AnalysisResult;
use crate::models::{EntryKind, RemoteFileHandle};
use rayon::prelude::*;
use regex::RegexSet;
use std::sync::OnceLock;
use tracing::{debug, warn};

pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Files at or above this size are not fetched
pub const MAX_FILE_BYTES: u64 = 1024 * 1024;

const PRUNED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "out",
    "target",
    "vendor",
    "coverage",
    "__pycache__",
    "venv",
    "tmp",
    "temp",
    "bower_components",
];

const CODE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "mjs", "cjs", "ts", "tsx", "py", "rs", "go", "java", "kt", "swift", "rb", "php",
    "cs", "c", "h", "cpp", "hpp", "cc", "scala", "vue", "svelte",
];

static EXCLUDED_PATHS: OnceLock<RegexSet> = OnceLock::new();

/// Matched against the lowercased path
fn excluded_paths() -> &'static RegexSet {
    EXCLUDED_PATHS.get_or_init(|| {
        RegexSet::new([
            // generated UI component libraries (shadcn and friends)
            r"(?:^|/)components/ui/",
            // dependency and build output
            r"(?:^|/)(?:node_modules|bower_components|vendor|dist|build|out|target|coverage|__pycache__|venv|\.venv|\.next|\.nuxt)/",
            r"\.(?:min|bundle|chunk|generated)\.",
            r"(?:_pb2\.py|\.pb\.go|_generated\.\w+)$",
            r"\.d\.[cm]?ts$",
            // tool config
            r"(?:^|/)[^/]+\.config\.\w+$",
            r"(?:^|/)(?:vite-env\.d|next-env\.d|setuptests|reportwebvitals|serviceworker)\.\w+$",
            r"(?:^|/)(?:package-lock\.json|yarn\.lock|pnpm-lock\.yaml|bun\.lockb|cargo\.lock|poetry\.lock|gemfile\.lock|composer\.lock)$",
            // scaffolded entry points
            r"^(?:src/)?(?:main|index|app)\.\w+$",
            // tests
            r"(?:^|/)(?:tests?|__tests__|__mocks__|specs?|e2e|fixtures)/",
            r"\.(?:test|spec)\.\w+$",
            r"(?:^|/)(?:test_[^/]+\.py|conftest\.py|[^/]+_test\.(?:go|py|rs))$",
            // documentation
            r"(?:^|/)(?:docs?|documentation|examples?)/",
            r"\.(?:md|mdx|rst|txt)$",
            // hidden directories
            r"(?:^|/)\.[^/]+/",
        ])
        .expect("valid regex")
    })
}

/// Files gathered by [`collect_files`], plus any subtrees that could not be read
#[derive(Debug, Default, Clone)]
pub struct Traversal {
    pub files: Vec<RemoteFileHandle>,
    pub warnings: Vec<String>,
}

impl Traversal {
    fn extend(&mut self, other: Traversal) {
        self.files.extend(other.files);
        self.warnings.extend(other.warnings);
    }
}

/// True for directories the walker never descends into
pub fn is_pruned_dir(handle: &RemoteFileHandle) -> bool {
    let name = handle.name.to_lowercase();
    if name.starts_with('.') || PRUNED_DIRS.contains(&name.as_str()) {
        return true;
    }
    let path = handle.path.to_lowercase();
    path == "components/ui" || path.ends_with("/components/ui")
}

/// Collect every file reachable from `start` within `max_depth` levels.
///
/// `max_depth` counts directory listings: 1 lists `start` only. A listing
/// error at `start` is returned; errors below it become warnings.
pub fn collect_files(
    source: &dyn RemoteSource,
    start: &str,
    max_depth: usize,
) -> AnalysisResult<Traversal> {
    if max_depth == 0 {
        return Ok(Traversal::default());
    }
    let entries = source.list_directory(start)?;
    let traversal = walk_entries(source, entries, max_depth - 1);
    debug!(
        "Walked {}: {} files, {} unreadable subtrees",
        source.identifier(),
        traversal.files.len(),
        traversal.warnings.len()
    );
    Ok(traversal)
}

fn walk_entries(
    source: &dyn RemoteSource,
    entries: Vec<RemoteFileHandle>,
    depth: usize,
) -> Traversal {
    let mut traversal = Traversal::default();
    let mut dirs = Vec::new();

    for entry in entries {
        match entry.kind {
            EntryKind::File => traversal.files.push(entry),
            EntryKind::Dir if is_pruned_dir(&entry) => debug!("Pruned {}", entry.path),
            EntryKind::Dir => dirs.push(entry),
            EntryKind::Other => {}
        }
    }

    let subtrees: Vec<Traversal> = dirs
        .par_iter()
        .map(|dir| walk_dir(source, &dir.path, depth))
        .collect();
    for subtree in subtrees {
        traversal.extend(subtree);
    }
    traversal
}

fn walk_dir(source: &dyn RemoteSource, path: &str, depth: usize) -> Traversal {
    if depth == 0 {
        return Traversal::default();
    }
    match source.list_directory(path) {
        Ok(entries) => walk_entries(source, entries, depth - 1),
        Err(e) => {
            warn!("Skipping unreadable directory: {}", e);
            Traversal {
                files: Vec::new(),
                warnings: vec![e.to_string()],
            }
        }
    }
}

/// Whether a file is worth downloading and classifying
pub fn is_analyzable(handle: &RemoteFileHandle) -> bool {
    if handle.kind != EntryKind::File || handle.download_url.is_none() {
        return false;
    }
    if handle.size >= MAX_FILE_BYTES {
        return false;
    }
    let Some(ext) = handle.extension() else {
        return false;
    };
    CODE_EXTENSIONS.contains(&ext.as_str()) && !excluded_paths().is_match(&handle.path.to_lowercase())
}

/// The analyzable subset of `files`, in order
pub fn select_analyzable(files: &[RemoteFileHandle]) -> Vec<&RemoteFileHandle> {
    files.iter().filter(|f| is_analyzable(f)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::remote::InMemorySource;

    fn paths(files: &[RemoteFileHandle]) -> Vec<&str> {
        files.iter().map(|f| f.path.as_str()).collect()
    }

    fn handle(path: &str) -> RemoteFileHandle {
        RemoteFileHandle::file(path, 512).with_download_url(format!("https://raw.example/{path}"))
    }

    #[test]
    fn test_dependency_directories_are_never_listed() {
        let source = InMemorySource::new("acme/widgets")
            .with_file("node_modules/pkg/index.js", "module.exports = 1;")
            .with_file("src/app.ts", "export const app = 1;");

        let traversal = collect_files(&source, "", DEFAULT_MAX_DEPTH).expect("walk");

        assert_eq!(paths(&traversal.files), vec!["src/app.ts"]);
        assert!(!source
            .listed_paths()
            .iter()
            .any(|p| p.contains("node_modules")));
    }

    #[test]
    fn test_pruned_directory_names() {
        for path in [".git", ".github", "dist", "Build", "src/components/ui", "pkg/__pycache__"] {
            assert!(is_pruned_dir(&RemoteFileHandle::dir(path)), "{path}");
        }
        for path in ["src", "src/components", "lib/ui", "distribution"] {
            assert!(!is_pruned_dir(&RemoteFileHandle::dir(path)), "{path}");
        }
    }

    #[test]
    fn test_unreadable_subtree_is_skipped() {
        let source = InMemorySource::new("acme/widgets")
            .with_file("lib/broken.ts", "x")
            .with_file("src/ok.ts", "y")
            .with_file("top.ts", "z")
            .with_failing_dir("lib");

        let traversal = collect_files(&source, "", DEFAULT_MAX_DEPTH).expect("walk");

        assert_eq!(paths(&traversal.files), vec!["top.ts", "src/ok.ts"]);
        assert_eq!(traversal.warnings.len(), 1);
        assert!(traversal.warnings[0].contains("lib"));
    }

    #[test]
    fn test_unreadable_root_is_fatal() {
        let source = InMemorySource::new("acme/widgets")
            .with_file("src/ok.ts", "y")
            .with_failing_dir("");

        let err = collect_files(&source, "", DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(matches!(err, AnalysisError::RemoteList { .. }));
    }

    #[test]
    fn test_depth_truncation() {
        let source = InMemorySource::new("acme/widgets")
            .with_file("root.ts", "r")
            .with_file("a/one.ts", "1")
            .with_file("a/b/two.ts", "2")
            .with_file("a/b/c/three.ts", "3")
            .with_file("a/b/c/d/four.ts", "4");

        let all = collect_files(&source, "", DEFAULT_MAX_DEPTH).expect("walk");
        assert_eq!(
            paths(&all.files),
            vec!["root.ts", "a/one.ts", "a/b/two.ts", "a/b/c/three.ts"]
        );

        let shallow = collect_files(&source, "", 1).expect("walk");
        assert_eq!(paths(&shallow.files), vec!["root.ts"]);

        let none = collect_files(&source, "", 0).expect("walk");
        assert!(none.files.is_empty());
    }

    #[test]
    fn test_walk_from_subdirectory() {
        let source = InMemorySource::new("acme/widgets")
            .with_file("root.ts", "r")
            .with_file("packages/core/lib.ts", "c");

        let traversal = collect_files(&source, "packages", DEFAULT_MAX_DEPTH).expect("walk");
        assert_eq!(paths(&traversal.files), vec!["packages/core/lib.ts"]);
    }

    #[test]
    fn test_filter_keeps_only_hand_written_sources() {
        let files = vec![
            handle("src/components/ui/button.tsx"),
            handle("src/index.ts"),
            handle("README.md"),
            handle("src/utils/helpers.ts"),
        ];
        let selected: Vec<&str> = select_analyzable(&files)
            .iter()
            .map(|f| f.path.as_str())
            .collect();
        assert_eq!(selected, vec!["src/utils/helpers.ts"]);
    }

    #[test]
    fn test_filter_exclusions() {
        for path in [
            "src/App.tsx",
            "main.py",
            "vite.config.ts",
            "src/types/api.d.ts",
            "public/vendor.min.js",
            "src/api/client.generated.ts",
            "tests/test_parser.py",
            "src/__tests__/hooks.ts",
            "src/hooks/useAuth.test.ts",
            "pkg/server/handler_test.go",
            "docs/guide/setup.js",
            ".storybook/preview.ts",
            "dist/bundle.js",
            "package-lock.json",
            "assets/logo.svg",
        ] {
            assert!(!is_analyzable(&handle(path)), "{path}");
        }
        for path in [
            "src/lib/utils.ts",
            "src/pages/Dashboard.tsx",
            "app/models.py",
            "src/commands/app.rs",
            "cmd/server/main.go",
            "src/main/java/com/acme/Service.java",
        ] {
            assert!(is_analyzable(&handle(path)), "{path}");
        }
    }

    #[test]
    fn test_filter_size_and_url() {
        let big = RemoteFileHandle::file("src/big.ts", MAX_FILE_BYTES)
            .with_download_url("https://raw.example/src/big.ts");
        assert!(!is_analyzable(&big));

        let no_url = RemoteFileHandle::file("src/lib.ts", 10);
        assert!(!is_analyzable(&no_url));

        assert!(!is_analyzable(&RemoteFileHandle::dir("src/lib.ts")));
    }
}
