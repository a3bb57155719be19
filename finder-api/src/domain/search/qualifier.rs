//! Serializes a [`ParsedIntent`] into GitHub's user-search qualifier syntax.

use std::borrow::Cow;

use super::traits::{Result, SearchError};
use super::types::{ParsedIntent, QualifierString};

/// Assemble the qualifier query for an intent.
///
/// Tokens follow the free text in a fixed order: `in:login`, `location:`, `language:`,
/// `in:sponsorable`, `repos:`, `followers:`, `type:`. Returns [`SearchError::EmptyQuery`] when
/// nothing is left to search for.
pub fn assemble(intent: &ParsedIntent) -> Result<QualifierString> {
    let mut tokens: Vec<Cow<'_, str>> = Vec::with_capacity(8);

    if !intent.free_text.is_empty() {
        tokens.push(Cow::Borrowed(intent.free_text.as_str()));
    }
    if let Some(username) = intent.username.as_deref() {
        tokens.push(Cow::Owned(format!("{} in:login", qualifier_value(username))));
    }
    if let Some(location) = intent.location.as_deref() {
        tokens.push(Cow::Owned(format!("location:{}", qualifier_value(location))));
    }
    if let Some(language) = intent.language.as_deref() {
        tokens.push(Cow::Owned(format!("language:{}", qualifier_value(language))));
    }
    if intent.sponsor {
        tokens.push(Cow::Borrowed("in:sponsorable"));
    }
    if let Some(repos) = intent.repos {
        tokens.push(Cow::Owned(format!("repos:{}", repos)));
    }
    if let Some(followers) = intent.followers {
        tokens.push(Cow::Owned(format!("followers:{}", followers)));
    }
    if let Some(account_type) = intent.account_type {
        tokens.push(Cow::Owned(format!("type:{}", account_type)));
    }

    let query = tokens.join(" ").trim().to_string();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    Ok(QualifierString::new(query))
}

/// Quotes values containing whitespace so the qualifier stays a single token.
fn qualifier_value(value: &str) -> Cow<'_, str> {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        let collapsed = value
            .split_whitespace()
            .map(|word| word.replace('"', ""))
            .collect::<Vec<_>>()
            .join(" ");
        Cow::Owned(format!("\"{}\"", collapsed))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::parser::interpret;
    use crate::domain::search::types::{AccountType, ComparisonOperator, ComparisonValue};

    #[test]
    fn empty_intent_is_an_error() {
        let intent = ParsedIntent::default();
        assert_eq!(assemble(&intent), Err(SearchError::EmptyQuery));

        let intent = ParsedIntent {
            free_text: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(assemble(&intent), Err(SearchError::EmptyQuery));
    }

    #[test]
    fn free_text_only() {
        let intent = ParsedIntent {
            free_text: "octocat".to_string(),
            ..Default::default()
        };
        assert_eq!(assemble(&intent).unwrap().as_str(), "octocat");
    }

    #[test]
    fn tokens_follow_fixed_order() {
        let intent = ParsedIntent {
            sponsor: true,
            repos: Some(ComparisonValue::new(ComparisonOperator::Gt, 50)),
            followers: Some(ComparisonValue::new(ComparisonOperator::Lt, 10)),
            location: Some("berlin".to_string()),
            language: Some("rust".to_string()),
            account_type: Some(AccountType::User),
            username: Some("octocat".to_string()),
            free_text: "hacker".to_string(),
        };

        assert_eq!(
            assemble(&intent).unwrap().as_str(),
            "hacker octocat in:login location:berlin language:rust in:sponsorable repos:>50 followers:<10 type:user"
        );
    }

    #[test]
    fn exact_counts_have_no_prefix() {
        let intent = ParsedIntent {
            repos: Some(ComparisonValue::new(ComparisonOperator::Eq, 5)),
            followers: Some(ComparisonValue::new(ComparisonOperator::Eq, 0)),
            ..Default::default()
        };
        assert_eq!(assemble(&intent).unwrap().as_str(), "repos:5 followers:0");
    }

    #[test]
    fn multi_word_values_are_quoted() {
        let intent = ParsedIntent {
            location: Some("san  francisco".to_string()),
            account_type: Some(AccountType::Org),
            ..Default::default()
        };
        assert_eq!(
            assemble(&intent).unwrap().as_str(),
            "location:\"san francisco\" type:org"
        );
    }

    #[test]
    fn assembles_interpreted_phrase() {
        let intent = interpret("developer in Berlin with more than 50 repos, sponsored");
        assert_eq!(
            assemble(&intent).unwrap().as_str(),
            "location:berlin in:sponsorable repos:>50 type:user"
        );
    }

    #[test]
    fn fully_consumed_phrase_still_assembles() {
        // Facets alone are a usable query even with no free text left.
        let intent = interpret("sponsored organization");
        assert_eq!(
            assemble(&intent).unwrap().as_str(),
            "in:sponsorable type:org"
        );
    }

    #[test]
    fn reinterpreting_a_qualifier_string_is_lossy() {
        let original = interpret("sponsored rust developers with more than 10 repos");
        let query = assemble(&original).unwrap();
        assert_eq!(
            query.as_str(),
            "language:rust in:sponsorable repos:>10 type:user"
        );

        let reparsed = interpret(query.as_str());
        assert_ne!(reparsed, original);
        assert!(!reparsed.sponsor);
        assert!(reparsed.repos.is_none());
    }
}
