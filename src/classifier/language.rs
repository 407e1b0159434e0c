//! Language tags derived from file extensions

/// Tag used when nothing better is known. It has no rule table.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Map a lowercase extension (without the dot) to a language tag
pub fn language_for_extension(ext: &str) -> &'static str {
    match ext {
        "js" | "jsx" | "mjs" | "cjs" | "vue" | "svelte" => "javascript",
        "ts" | "tsx" | "mts" | "cts" => "typescript",
        "py" | "pyi" => "python",
        "rs" => "rust",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "swift" => "swift",
        "rb" => "ruby",
        "php" => "php",
        "cs" => "csharp",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" | "hh" => "cpp",
        "scala" => "scala",
        _ => UNKNOWN_LANGUAGE,
    }
}

/// Language tag for a `/`-separated path
pub fn language_for_path(path: &str) -> &'static str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => language_for_extension(&ext.to_lowercase()),
        _ => UNKNOWN_LANGUAGE,
    }
}

/// Normalize a user-supplied language tag.
///
/// Full names pass through lowercased; extension-style aliases such as `ts`
/// or `py` resolve to their full tag.
pub fn normalize_language(tag: &str) -> String {
    let tag = tag.trim().to_lowercase();
    match language_for_extension(&tag) {
        UNKNOWN_LANGUAGE => tag,
        resolved => resolved.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_for_path() {
        assert_eq!(language_for_path("src/app.tsx"), "typescript");
        assert_eq!(language_for_path("lib/Main.JAVA"), "java");
        assert_eq!(language_for_path("pkg/server.go"), "go");
        assert_eq!(language_for_path("scripts/run.py"), "python");
        assert_eq!(language_for_path("Makefile"), UNKNOWN_LANGUAGE);
        assert_eq!(language_for_path(".gitignore"), UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_normalize_language_aliases() {
        assert_eq!(normalize_language("ts"), "typescript");
        assert_eq!(normalize_language(" JS "), "javascript");
        assert_eq!(normalize_language("py"), "python");
        assert_eq!(normalize_language("rs"), "rust");
        assert_eq!(normalize_language("Go"), "go");
        assert_eq!(normalize_language("TypeScript"), "typescript");
        assert_eq!(normalize_language("cobol"), "cobol");
    }
}
