//! Closed vocabulary of languages recognised in search phrases.

use regex::Regex;
use std::sync::LazyLock;

/// Canonical language name followed by the spellings that map to it.
///
/// Order matters: when a phrase names several languages, the earliest entry wins.
pub const LANGUAGES: &[(&str, &[&str])] = &[
    ("javascript", &["javascript"]),
    ("typescript", &["typescript"]),
    ("python", &["python"]),
    ("java", &["java"]),
    ("kotlin", &["kotlin"]),
    ("scala", &["scala"]),
    ("rust", &["rust"]),
    ("go", &["golang", "go"]),
    ("c++", &["c++", "cpp"]),
    ("c#", &["c#", "csharp"]),
    ("swift", &["swift"]),
    ("objective-c", &["objective-c", "objc"]),
    ("ruby", &["ruby"]),
    ("php", &["php"]),
    ("elixir", &["elixir"]),
    ("erlang", &["erlang"]),
    ("haskell", &["haskell"]),
    ("clojure", &["clojure"]),
    ("dart", &["dart"]),
    ("lua", &["lua"]),
    ("perl", &["perl"]),
    ("julia", &["julia"]),
    ("zig", &["zig"]),
    ("shell", &["shell", "bash"]),
    ("html", &["html"]),
    ("css", &["css"]),
];

/// Compiled whole-word matchers, in vocabulary order.
///
/// `\b` does not work for names ending in `+` or `#`, so word edges are matched explicitly and
/// the spelling itself is captured in group 1.
pub(super) static LANGUAGE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    LANGUAGES
        .iter()
        .map(|(canonical, spellings)| {
            let alternatives = spellings
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(
                r"(?i)(?:^|[^\p{{L}}\p{{N}}_])({})(?:$|[^\p{{L}}\p{{N}}_+#])",
                alternatives
            );
            (Regex::new(&pattern).unwrap(), *canonical)
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(LANGUAGE_PATTERNS.len(), LANGUAGES.len());
    }

    #[test]
    fn canonical_names_are_lower_case() {
        for (canonical, _) in LANGUAGES {
            assert_eq!(*canonical, canonical.to_lowercase());
        }
    }

    #[test]
    fn symbols_need_word_edges() {
        let (cpp, _) = LANGUAGE_PATTERNS
            .iter()
            .find(|(_, name)| *name == "c++")
            .unwrap();
        assert!(cpp.is_match("modern C++ developer"));
        assert!(!cpp.is_match("c+++"));
        assert!(!cpp.is_match("abc++"));
    }
}
