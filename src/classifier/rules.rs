//! Pattern library
//!
//! Weighted detection rules evaluated against every trimmed line. The tables
//! are plain constants: `(pattern, weight, rationale, polarity)`. They are
//! compiled once on first use and never change afterwards.
//!
//! Generic rules run for every language. Language rules run only when the
//! line's language tag has an entry; unknown tags contribute nothing.

use crate::models::Polarity::{self, Ai, Human};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A compiled detection rule
#[derive(Debug)]
pub struct DetectionRule {
    pub matcher: Regex,
    pub weight: f64,
    pub rationale: &'static str,
    pub polarity: Polarity,
}

type RuleSpec = (&'static str, f64, &'static str, Polarity);

const GENERIC_RULES: &[RuleSpec] = &[
    (
        r"\b[a-z]+(?:[A-Z][a-z0-9]+){2,}\b",
        0.3,
        "Verbose multi-word camelCase identifier",
        Ai,
    ),
    (
        r"^(?:(?:\*|/\*\*|///|//!|#)\s*@(?:param|returns?|throws|raises|example)\b|:(?:param|returns?|raises)\b|(?:Args|Returns|Raises|Parameters):$)",
        0.5,
        "Structured documentation tag",
        Ai,
    ),
    (
        r"^(?://|#)\s+[A-Z][a-z]+(?:\s+[\w',-]+){3,}\.$",
        0.35,
        "Full-sentence explanatory comment",
        Ai,
    ),
    (
        r"(?i)^(?://+|#+)\s*(?:step\s*\d+|first,|then,|next,|finally,|note:)",
        0.4,
        "Narrated step-by-step comment",
        Ai,
    ),
    (
        r#"(?:Error|Exception|error)\(\s*f?["'`][A-Z][^"'`]{20,}["'`]"#,
        0.45,
        "Descriptive error message",
        Ai,
    ),
    (
        r"^(?:try\s*\{|\}\s*catch\s*[({]|try:$|except\s+\w+|\}\s*finally\s*\{|finally:$)",
        0.3,
        "Structured error handling",
        Ai,
    ),
    (
        r"(?:if\s*\(\s*!\w+|typeof\s+\w+\s*[!=]==|\binstanceof\b|\bisinstance\(|!==?\s*(?:null|undefined|None|nil)\b|\bis\s+not\s+None\b)",
        0.35,
        "Input validation guard",
        Ai,
    ),
    (r"\?\.\w|\?\?\s", 0.25, "Defensive optional chaining", Ai),
    (r"\bawait\s+[\w.]+\(", 0.2, "Async/await call", Ai),
    (
        r"`[^`]*\$\{[^}]+\}",
        0.2,
        "Template string interpolation",
        Ai,
    ),
    (
        r"(?i)\b(?:TODO|FIXME|HACK|XXX)\b",
        0.6,
        "Task marker left in code",
        Human,
    ),
    (
        r"^(?:console\.log\(|print\(|println!\(|dbg!\(|fmt\.Println\(|System\.out\.println\(|puts\s|var_dump\()",
        0.4,
        "Ad-hoc debug output",
        Human,
    ),
    (
        r"(?i)(?://|#).*\b(?:lol|wtf|hmm+|ugh|oops|yolo|idk|dunno|whatever)\b",
        0.7,
        "Casual comment language",
        Human,
    ),
    (r"!!!|\?\?\?|\.{4,}", 0.4, "Emphatic punctuation", Human),
    (
        r"\b(?:tmp|cnt|ptr|buf|idx|arr)\d*\b",
        0.25,
        "Terse abbreviated name",
        Human,
    ),
    (
        r"^(?://|#)\s*(?:[\w.]+\(.*\)\s*;?|(?:let|const|var)?\s*\w+\s*=\s*[^=\s].*)$",
        0.35,
        "Commented-out code",
        Human,
    ),
    (
        r"\w {2,}=|= {2,}\w|,[A-Za-z_]",
        0.2,
        "Irregular spacing",
        Human,
    ),
];

const JAVASCRIPT_RULES: &[RuleSpec] = &[
    (
        r"^(?:const|let)\s+\w+\s*=\s*[^;]+;$",
        0.3,
        "Consistent const/let declaration",
        Ai,
    ),
    (
        r"^(?:export\s+)?const\s+\w+\s*=\s*(?:async\s*)?\([^)]*\)[^=]*=>",
        0.4,
        "Arrow function assigned to a constant",
        Ai,
    ),
    (
        r"^(?:const|let)\s*[{\[][^}\]]+[}\]]\s*=",
        0.3,
        "Destructuring assignment",
        Ai,
    ),
    (
        r"^export\s+(?:default\s+)?(?:async\s+)?(?:function|const|class)\b",
        0.25,
        "Explicit module export",
        Ai,
    ),
    (
        r"\.(?:map|filter|reduce)\(\s*\(?\w*(?:,\s*\w+)*\)?\s*=>",
        0.2,
        "Functional array pipeline",
        Ai,
    ),
    (r"^var\s+\w+", 0.3, "Legacy var declaration", Human),
    (
        r"[^=!<>]==[^=]|!=[^=]",
        0.25,
        "Loose equality comparison",
        Human,
    ),
    (r"^//\s*eslint-disable", 0.4, "Lint suppression", Human),
];

const TYPESCRIPT_RULES: &[RuleSpec] = &[
    (
        r":\s*(?:string|number|boolean|void|unknown|Promise<|Record<|Array<)",
        0.3,
        "Explicit type annotation",
        Ai,
    ),
    (
        r"^(?:export\s+)?(?:interface|type)\s+[A-Z]\w*",
        0.35,
        "Declared interface or type alias",
        Ai,
    ),
    (r":\s*any\b|\bas\s+any\b", 0.35, "Escape hatch to any", Human),
    (
        r"@ts-ignore|@ts-nocheck",
        0.45,
        "Type checker suppression",
        Human,
    ),
];

const PYTHON_RULES: &[RuleSpec] = &[
    (
        r"^(?:async\s+)?def\s+\w+\(.*\)\s*->\s*[\w\[\], .|]+:$",
        0.45,
        "Fully type-hinted function signature",
        Ai,
    ),
    (r#"^(?:"""|''')"#, 0.35, "Docstring delimiter", Ai),
    (r"^from\s+typing\s+import\b", 0.3, "Typing import", Ai),
    (
        r"\blogger\.(?:debug|info|warning|error|exception)\(",
        0.3,
        "Structured logger call",
        Ai,
    ),
    (r#"\bf["'][^"']*\{[^}]+\}"#, 0.2, "f-string formatting", Ai),
    (
        r"^import\s+\w+(?:\s*,\s*\w+)+",
        0.3,
        "Several modules imported on one line",
        Human,
    ),
    (r"^except\s*:", 0.45, "Bare except clause", Human),
    (
        r"#\s*type:\s*ignore|#\s*noqa",
        0.25,
        "Checker suppression comment",
        Human,
    ),
];

const RUST_RULES: &[RuleSpec] = &[
    (r"^///\s", 0.35, "Doc comment", Ai),
    (
        r"\.(?:map_err|context|with_context)\(",
        0.3,
        "Explicit error mapping",
        Ai,
    ),
    (r"^#\[derive\(", 0.2, "Derived trait list", Ai),
    (r"->\s*(?:Result|Option)<", 0.3, "Fallible return type", Ai),
    (r"\.unwrap\(\)", 0.35, "Unchecked unwrap", Human),
    (
        r"\b(?:todo|unimplemented|dbg)!\(",
        0.5,
        "Placeholder macro",
        Human,
    ),
    (r"^#\[allow\(", 0.25, "Lint allowance", Human),
];

const GO_RULES: &[RuleSpec] = &[
    (
        r"^if\s+err\s*!=\s*nil\s*\{$",
        0.3,
        "Idiomatic error check",
        Ai,
    ),
    (r#"fmt\.Errorf\("[^"]*%w"#, 0.35, "Wrapped error", Ai),
    (
        r"^//\s*[A-Z]\w+\s+(?:returns|creates|handles|is|represents)\b",
        0.35,
        "Godoc sentence",
        Ai,
    ),
    (
        r"^_\s*(?:,\s*_)?\s*=\s*\w+",
        0.3,
        "Discarded value",
        Human,
    ),
    (r"\bpanic\(", 0.35, "Panic call", Human),
];

const JAVA_RULES: &[RuleSpec] = &[
    (r"^@Override$", 0.2, "Override annotation", Ai),
    (r"^private\s+final\s+\w+", 0.25, "Immutable field", Ai),
    (r"\bOptional<", 0.3, "Optional return", Ai),
    (
        r"Objects\.requireNonNull\(",
        0.4,
        "Null precondition",
        Ai,
    ),
    (r"System\.out\.println\(", 0.3, "Console output", Human),
    (r"\.printStackTrace\(\)", 0.5, "Printed stack trace", Human),
    (
        r"catch\s*\(\s*Exception\s+\w+\s*\)\s*\{\s*\}",
        0.45,
        "Swallowed exception",
        Human,
    ),
];

/// Language tags with their own rule tables. TypeScript inherits the
/// JavaScript rules.
const LANGUAGE_TABLES: &[(&str, &[&[RuleSpec]])] = &[
    ("javascript", &[JAVASCRIPT_RULES]),
    ("typescript", &[JAVASCRIPT_RULES, TYPESCRIPT_RULES]),
    ("python", &[PYTHON_RULES]),
    ("rust", &[RUST_RULES]),
    ("go", &[GO_RULES]),
    ("java", &[JAVA_RULES]),
];

/// Identifier segments that read as playful or placeholder naming
pub const PLAYFUL_TOKENS: &[&str] = &[
    "foo", "bar", "baz", "qux", "hack", "hacky", "kludge", "lol", "wtf", "yolo", "asdf", "derp",
    "blah", "meh",
];

static GENERIC: OnceLock<Vec<DetectionRule>> = OnceLock::new();
static BY_LANGUAGE: OnceLock<HashMap<&'static str, Vec<DetectionRule>>> = OnceLock::new();
static HUMAN_SIGNATURE: OnceLock<Regex> = OnceLock::new();

fn compile(specs: &[RuleSpec]) -> Vec<DetectionRule> {
    specs
        .iter()
        .map(|&(pattern, weight, rationale, polarity)| DetectionRule {
            matcher: Regex::new(pattern).expect("valid regex"),
            weight,
            rationale,
            polarity,
        })
        .collect()
}

/// Rules applied to every line regardless of language
pub fn generic_rules() -> &'static [DetectionRule] {
    GENERIC.get_or_init(|| compile(GENERIC_RULES))
}

/// Rules registered for `language`; empty for unknown tags
pub fn language_rules(language: &str) -> &'static [DetectionRule] {
    let tables = BY_LANGUAGE.get_or_init(|| {
        LANGUAGE_TABLES
            .iter()
            .map(|(tag, parts)| {
                let rules = parts.iter().flat_map(|specs| compile(specs)).collect();
                (*tag, rules)
            })
            .collect()
    });
    tables.get(language).map(Vec::as_slice).unwrap_or(&[])
}

/// Language tags that carry their own rules
pub fn known_languages() -> impl Iterator<Item = &'static str> {
    LANGUAGE_TABLES.iter().map(|(tag, _)| *tag)
}

/// Split a line into lowercase identifier segments.
///
/// Breaks on anything non-alphanumeric and on lower-to-upper camelCase
/// transitions, so `fooBar_hack` yields `foo`, `bar`, `hack`.
pub fn identifier_segments(line: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in line.chars() {
        if !ch.is_ascii_alphanumeric() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_ascii_uppercase() && prev_lower && !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        current.push(ch.to_ascii_lowercase());
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

pub fn contains_playful_token(line: &str) -> bool {
    identifier_segments(line)
        .iter()
        .any(|seg| PLAYFUL_TOKENS.contains(&seg.as_str()))
}

fn human_signature_re() -> &'static Regex {
    HUMAN_SIGNATURE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:TODO|FIXME|HACK|XXX|WIP)\b|!!!|\?\?\?|:\)|;\)|:-\)|\b(?:lol|wtf|ugh|oops|yolo)\b|^(?:console\.log|print|println!|dbg!|fmt\.Println|System\.out\.println)\(",
        )
        .expect("valid regex")
    })
}

/// Lines that carry a human signature and are never reclassified by the
/// contextual smoother: planning markers, placeholder tokens, casual
/// punctuation and bare debug prints.
pub fn is_human_signature(line: &str) -> bool {
    let trimmed = line.trim();
    human_signature_re().is_match(trimmed) || contains_playful_token(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_compile_with_non_negative_weights() {
        let mut total = generic_rules().len();
        for rule in generic_rules() {
            assert!(rule.weight >= 0.0, "{}", rule.rationale);
        }
        for tag in known_languages() {
            let rules = language_rules(tag);
            assert!(!rules.is_empty(), "no rules for {tag}");
            assert!(rules.iter().all(|r| r.weight >= 0.0));
            total += rules.len();
        }
        assert!(total > 40);
    }

    #[test]
    fn test_unknown_language_has_no_rules() {
        assert!(language_rules("cobol").is_empty());
        assert!(language_rules("").is_empty());
    }

    #[test]
    fn test_typescript_inherits_javascript() {
        let js = language_rules("javascript").len();
        let ts = language_rules("typescript").len();
        assert_eq!(ts, js + TYPESCRIPT_RULES.len());
    }

    #[test]
    fn test_identifier_segments() {
        assert_eq!(
            identifier_segments("foo_bar_hack();"),
            vec!["foo", "bar", "hack"]
        );
        assert_eq!(
            identifier_segments("getUserName(id)"),
            vec!["get", "user", "name", "id"]
        );
        assert_eq!(identifier_segments("HTTPServer"), vec!["httpserver"]);
    }

    #[test]
    fn test_playful_tokens_need_whole_segments() {
        assert!(contains_playful_token("let fooValue = 1"));
        assert!(contains_playful_token("quick_hack()"));
        assert!(!contains_playful_token("const toolbar = new Toolbar();"));
        assert!(!contains_playful_token("import barrel from './barrel';"));
    }

    #[test]
    fn test_human_signature() {
        assert!(is_human_signature("// TODO: remove before release"));
        assert!(is_human_signature("console.log(data)"));
        assert!(is_human_signature("x = 1 // works :)"));
        assert!(is_human_signature("foo_bar_hack();"));
        assert!(!is_human_signature("const total = items.length;"));
        assert!(!is_human_signature("logger.info(\"done\")"));
    }

    #[test]
    fn test_loose_equality_ignores_strict() {
        let rule = language_rules("javascript")
            .iter()
            .find(|r| r.rationale == "Loose equality comparison")
            .expect("rule exists");
        assert!(rule.matcher.is_match("if (a == b) {"));
        assert!(rule.matcher.is_match("if (a != b) {"));
        assert!(!rule.matcher.is_match("if (a === b) {"));
        assert!(!rule.matcher.is_match("if (a !== b) {"));
    }
}
