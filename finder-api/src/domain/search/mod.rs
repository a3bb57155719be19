//! Natural-language user search.
//!
//! A free-form phrase such as `"developer in Berlin with more than 50 repos, sponsored"` goes
//! through three steps:
//!
//! 1. `interpret` runs an ordered set of extraction rules over the phrase and produces a
//!    `ParsedIntent` (location, language, counts, account type, sponsorship, free text).
//! 2. `assemble` serializes the intent into GitHub's qualifier syntax, e.g.
//!    `location:berlin in:sponsorable repos:>50 type:user`.
//! 3. [`UserSearchService`] forwards the qualifier query to a [`UserSearchProvider`] and
//!    returns the normalized page together with the interpreted query.
//!
//! # Query Syntax
//!
//! - `"5 repos"` → `repos:5`, `"more than 5 repos"` / `"5+ repos"` → `repos:>5`,
//!   `"few than 5 repos"` → `repos:<5` (same for followers)
//! - `"in Berlin"`, `"based in Lisbon"`, `"from New York"` → `location:`
//! - `"rust"`, `"node.js"` → `language:`
//! - `"sponsored"` → `in:sponsorable`
//! - `"org"`, `"organization"`, `"user"` and job titles such as `"developer"` → `type:`
//! - `"contributor"`, `"maintainer"` → `repos:>1`

mod parser;
mod qualifier;
mod service;
mod traits;
mod types;
mod vocabulary;

pub mod provider;

// Re-export main types
pub use service::{SearchConfig, UserSearchService};
pub use traits::{SearchError, UserSearchProvider};
pub use types::{AccountType, SearchOutcome, UserHit};

#[cfg(test)]
pub use types::SearchPage;
