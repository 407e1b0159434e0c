//! `authorscan snippet` - classify one file or stdin

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::classifier::{language_for_path, normalize_language, rules, UNKNOWN_LANGUAGE};
use crate::pipeline;
use crate::reporters::{self, OutputFormat};

pub(super) fn run(
    file: Option<&Path>,
    lang: Option<&str>,
    show_lines: bool,
    format: OutputFormat,
) -> Result<()> {
    let text = read_input(file)?;
    let language = resolve_language(file, lang);
    if !has_language_rules(&language) {
        warn!(
            "No rules for language '{}'; only generic rules apply",
            language
        );
    }
    debug!("Classifying {} bytes as {}", text.len(), language);

    let verdict = pipeline::analyze_snippet(&text, &language);
    print!("{}", reporters::render_file(&verdict, format, show_lines)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file.filter(|p| p.as_os_str() != "-") {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// An explicit tag wins; otherwise go by the file extension
fn resolve_language(file: Option<&Path>, lang: Option<&str>) -> String {
    if let Some(lang) = lang {
        return normalize_language(lang);
    }
    file.map(|p| language_for_path(&p.to_string_lossy()).to_string())
        .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())
}

fn has_language_rules(language: &str) -> bool {
    rules::known_languages().any(|known| known == language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_language() {
        assert_eq!(resolve_language(None, Some(" TypeScript ")), "typescript");
        assert_eq!(
            resolve_language(Some(Path::new("src/lib.rs")), None),
            "rust"
        );
        assert_eq!(
            resolve_language(Some(Path::new("main.py")), Some("go")),
            "go"
        );
        assert_eq!(resolve_language(None, None), "unknown");
    }

    #[test]
    fn test_short_language_tags_resolve_to_rule_tables() {
        for (alias, full) in [("ts", "typescript"), ("js", "javascript"), ("py", "python")] {
            let language = resolve_language(None, Some(alias));
            assert_eq!(language, full);
            assert!(has_language_rules(&language));
        }
        assert!(!has_language_rules("cobol"));
        assert!(!has_language_rules(UNKNOWN_LANGUAGE));
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.js");
        std::fs::write(&path, "const a = 1;\n").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), "const a = 1;\n");
        assert!(read_input(Some(&dir.path().join("missing.js"))).is_err());
    }
}
