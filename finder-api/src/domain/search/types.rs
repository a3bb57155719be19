//! Core types for the user search domain.

use std::fmt;

use serde::Serialize;

/// Comparison inferred from the phrasing around a count ("more than 5", "5+", "few than 5").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Eq,
    Gt,
    Lt,
}

impl ComparisonOperator {
    /// Prefix used in GitHub range qualifiers, e.g. `repos:>5`.
    pub fn qualifier_prefix(self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Lt => "<",
        }
    }
}

/// A count facet such as the number of repositories or followers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ComparisonValue {
    pub operator: ComparisonOperator,
    pub value: u64,
}

impl ComparisonValue {
    pub fn new(operator: ComparisonOperator, value: u64) -> Self {
        Self { operator, value }
    }
}

impl fmt::Display for ComparisonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator.qualifier_prefix(), self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    User,
    Org,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::User => write!(f, "user"),
            AccountType::Org => write!(f, "org"),
        }
    }
}

/// Structured facets extracted from a free-form phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedIntent {
    /// Phrase mentions sponsorship ("sponsor", "sponsored").
    pub sponsor: bool,
    pub repos: Option<ComparisonValue>,
    pub followers: Option<ComparisonValue>,
    /// Lower-cased free-text location.
    pub location: Option<String>,
    /// Canonical language name from the closed vocabulary, or `node`.
    pub language: Option<String>,
    pub account_type: Option<AccountType>,
    /// Login to match with `in:login`. Never populated by the interpreter.
    pub username: Option<String>,
    /// Whatever is left after facet extraction and cleanup. May be empty.
    pub free_text: String,
}

/// Query in GitHub's qualifier syntax, ready to be sent as the `q` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct QualifierString(String);

impl QualifierString {
    pub(super) fn new(query: String) -> Self {
        Self(query)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for QualifierString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QualifierString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request handed to a [`UserSearchProvider`](super::UserSearchProvider): the assembled
/// query plus pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledSearch {
    pub query: QualifierString,
    pub per_page: u32,
    pub page: u32,
}

/// One user returned by the search backend, normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct UserHit {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    pub account_type: AccountType,
    pub score: f64,
}

/// One page of results from the search backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub total_count: u64,
    pub incomplete_results: bool,
    pub items: Vec<UserHit>,
}

/// Result of a full search: the interpretation plus the backend page.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub intent: ParsedIntent,
    pub query_interpreted: QualifierString,
    pub page: u32,
    pub per_page: u32,
    pub results: SearchPage,
}
