//! Phrase interpreter for extracting user-search facets from natural language.
//!
//! Transforms phrases like "developer in Berlin with more than 50 repos, sponsored" into a
//! [`ParsedIntent`]. Extraction runs as an ordered pipeline of rules over one working string:
//! each rule sees only the text left behind by the rules before it, and removes what it
//! recognises. The order of [`RULES`] is part of the contract (e.g. the contributor synonym
//! must run after the numeric repository rule so it can override it).

use std::ops::Range;

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::types::{AccountType, ComparisonOperator, ComparisonValue, ParsedIntent};
use super::vocabulary::LANGUAGE_PATTERNS;

/// Accumulator threaded through the rule pipeline.
#[derive(Debug, Clone, Default)]
struct Interpretation {
    intent: ParsedIntent,
    remaining: String,
}

/// Result of a single extractor: the recognised value and the text with its span removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Extracted<T> {
    pub value: Option<T>,
    pub remaining: String,
}

impl<T> Extracted<T> {
    fn unmatched(text: &str) -> Self {
        Self {
            value: None,
            remaining: text.to_string(),
        }
    }

    fn matched(value: T, remaining: String) -> Self {
        Self {
            value: Some(value),
            remaining,
        }
    }
}

type Rule = fn(Interpretation) -> Interpretation;

/// Extraction rules in application order.
const RULES: &[(&str, Rule)] = &[
    ("sponsorship", apply_sponsor),
    ("repo_count", apply_repo_count),
    ("follower_count", apply_follower_count),
    ("location", apply_location),
    ("language", apply_language),
    ("account_type", apply_account_type),
    ("contributor", apply_contributor),
    ("occupational_role", apply_role),
];

/// Interpret a free-form phrase into structured search facets.
///
/// Never fails: an empty phrase, or one fully consumed by the rules, yields an intent with
/// only `free_text = ""` set. Deciding whether such an intent is usable is up to the caller.
///
/// # Examples
///
/// ```ignore
/// let intent = interpret("developer in Berlin with more than 50 followers");
/// assert_eq!(intent.location.as_deref(), Some("berlin"));
/// assert_eq!(intent.account_type, Some(AccountType::User));
/// assert_eq!(intent.free_text, "");
/// ```
pub fn interpret(phrase: &str) -> ParsedIntent {
    let start = Interpretation {
        intent: ParsedIntent::default(),
        remaining: phrase.to_string(),
    };

    let Interpretation {
        mut intent,
        remaining,
    } = RULES.iter().fold(start, |acc, (name, rule)| {
        let acc = rule(acc);
        tracing::trace!(rule = name, remaining = %acc.remaining, "applied extraction rule");
        acc
    });

    intent.free_text = normalize_whitespace(&strip_punctuation(&remaining));
    intent
}

// Regex patterns compiled once
static SPONSOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsponsor(?:ed)?\b").unwrap());
static REPO_COUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| count_pattern(r"repo(?:s|sitory|sitories)?"));
static FOLLOWER_COUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| count_pattern(r"followers?"));
static LOCATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:based\s+in|in|from)\s+(\p{L}+(?:\s+\p{L}+)*?)\s*(?:,|\bwith\b|\band\b|$)",
    )
    .unwrap()
});
static NODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnode(?:\.?js)?\b").unwrap());
static ACCOUNT_TYPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(user|organization|org)s?\b").unwrap());
static CONTRIBUTOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:contributor|maintainer)s?\b").unwrap());
static ROLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:developer|engineer|architect|designer|tester|analyst|consultant|manager|director|lead|principal|senior|junior|entry|level)s?\b",
    )
    .unwrap()
});

/// Count grammar shared by repositories and followers:
/// `[with] [few than|more than] N[+] <noun>`.
fn count_pattern(noun: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)\b(?:with\s+)?(?:(few|fewer|less|more)\s+than\s+)?(\d+)(\+)?\s*{noun}\b"
    ))
    .unwrap()
}

fn apply_sponsor(mut acc: Interpretation) -> Interpretation {
    let extracted = extract_sponsor(&acc.remaining);
    if extracted.value.is_some() {
        acc.intent.sponsor = true;
    }
    acc.remaining = extracted.remaining;
    acc
}

fn apply_repo_count(mut acc: Interpretation) -> Interpretation {
    let extracted = extract_repo_count(&acc.remaining);
    if extracted.value.is_some() {
        acc.intent.repos = extracted.value;
    }
    acc.remaining = extracted.remaining;
    acc
}

fn apply_follower_count(mut acc: Interpretation) -> Interpretation {
    let extracted = extract_follower_count(&acc.remaining);
    if extracted.value.is_some() {
        acc.intent.followers = extracted.value;
    }
    acc.remaining = extracted.remaining;
    acc
}

fn apply_location(mut acc: Interpretation) -> Interpretation {
    let extracted = extract_location(&acc.remaining);
    if extracted.value.is_some() {
        acc.intent.location = extracted.value;
    }
    acc.remaining = extracted.remaining;
    acc
}

fn apply_language(mut acc: Interpretation) -> Interpretation {
    let extracted = extract_language(&acc.remaining);
    if extracted.value.is_some() {
        acc.intent.language = extracted.value;
    }
    acc.remaining = extracted.remaining;
    acc
}

fn apply_account_type(mut acc: Interpretation) -> Interpretation {
    let extracted = extract_account_type(&acc.remaining);
    if extracted.value.is_some() {
        acc.intent.account_type = extracted.value;
    }
    acc.remaining = extracted.remaining;
    acc
}

fn apply_contributor(mut acc: Interpretation) -> Interpretation {
    let extracted = extract_contributor(&acc.remaining);
    if extracted.value.is_some() {
        // A contributor has more than one repository, whatever count was parsed earlier.
        acc.intent.repos = Some(ComparisonValue::new(ComparisonOperator::Gt, 1));
    }
    acc.remaining = extracted.remaining;
    acc
}

fn apply_role(mut acc: Interpretation) -> Interpretation {
    let extracted = extract_role(&acc.remaining);
    if extracted.value.is_some() {
        acc.intent.account_type = Some(AccountType::User);
    }
    acc.remaining = extracted.remaining;
    acc
}

pub(super) fn extract_sponsor(text: &str) -> Extracted<()> {
    remove_all(&SPONSOR_PATTERN, text)
}

pub(super) fn extract_repo_count(text: &str) -> Extracted<ComparisonValue> {
    extract_count(&REPO_COUNT_PATTERN, text)
}

pub(super) fn extract_follower_count(text: &str) -> Extracted<ComparisonValue> {
    extract_count(&FOLLOWER_COUNT_PATTERN, text)
}

fn extract_count(pattern: &Regex, text: &str) -> Extracted<ComparisonValue> {
    let Some(cap) = pattern.captures(text) else {
        return Extracted::unmatched(text);
    };
    let Some(value) = cap.get(2).and_then(|m| m.as_str().parse::<u64>().ok()) else {
        return Extracted::unmatched(text);
    };

    let operator = infer_operator(&cap);
    let span = whole_match(&cap);
    Extracted::matched(
        ComparisonValue::new(operator, value),
        remove_span(text, span),
    )
}

fn infer_operator(cap: &Captures<'_>) -> ComparisonOperator {
    let qualifier = cap.get(1).map(|m| m.as_str().to_lowercase());
    match qualifier.as_deref() {
        Some("few" | "fewer" | "less") => ComparisonOperator::Lt,
        Some("more") => ComparisonOperator::Gt,
        _ if cap.get(3).is_some() => ComparisonOperator::Gt,
        _ => ComparisonOperator::Eq,
    }
}

/// The trailing connector (`with`, `and`, comma) is left in the text.
pub(super) fn extract_location(text: &str) -> Extracted<String> {
    let Some(cap) = LOCATION_PATTERN.captures(text) else {
        return Extracted::unmatched(text);
    };
    let (Some(whole), Some(place)) = (cap.get(0), cap.get(1)) else {
        return Extracted::unmatched(text);
    };

    let location = place.as_str().to_lowercase();
    Extracted::matched(location, remove_span(text, whole.start()..place.end()))
}

/// `node`/`node.js` is checked before the vocabulary, so "node.js" is never read as
/// some other entry.
pub(super) fn extract_language(text: &str) -> Extracted<String> {
    if let Some(m) = NODE_PATTERN.find(text) {
        return Extracted::matched("node".to_string(), remove_span(text, m.range()));
    }

    for (re, canonical) in LANGUAGE_PATTERNS.iter() {
        if let Some(spelling) = re.captures(text).and_then(|cap| cap.get(1)) {
            return Extracted::matched(
                canonical.to_string(),
                remove_span(text, spelling.range()),
            );
        }
    }

    Extracted::unmatched(text)
}

pub(super) fn extract_account_type(text: &str) -> Extracted<AccountType> {
    let Some(cap) = ACCOUNT_TYPE_PATTERN.captures(text) else {
        return Extracted::unmatched(text);
    };

    let account_type = match cap[1].to_lowercase().as_str() {
        "user" => AccountType::User,
        _ => AccountType::Org,
    };
    Extracted::matched(account_type, remove_span(text, whole_match(&cap)))
}

pub(super) fn extract_contributor(text: &str) -> Extracted<()> {
    remove_all(&CONTRIBUTOR_PATTERN, text)
}

pub(super) fn extract_role(text: &str) -> Extracted<()> {
    remove_all(&ROLE_PATTERN, text)
}

/// Flag-like rules consume every occurrence of their keywords.
fn remove_all(pattern: &Regex, text: &str) -> Extracted<()> {
    if pattern.is_match(text) {
        Extracted::matched((), pattern.replace_all(text, " ").to_string())
    } else {
        Extracted::unmatched(text)
    }
}

fn whole_match(cap: &Captures<'_>) -> Range<usize> {
    cap.get(0).map(|m| m.range()).unwrap_or(0..0)
}

/// Replaces the span with a single space so neighbouring words are not glued together.
fn remove_span(text: &str, span: Range<usize>) -> String {
    let mut result = String::with_capacity(text.len());
    result.push_str(&text[..span.start]);
    result.push(' ');
    result.push_str(&text[span.end..]);
    result
}

fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '.' | ',' | '+'))
        .collect()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
