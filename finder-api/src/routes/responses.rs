//! HTTP response types for the search endpoint.
//!
//! These types serialize to the JSON envelope clients rely on.

use serde::Serialize;

use crate::domain::search::{AccountType, SearchOutcome, UserHit};

/// Success envelope shared by all endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<M, D> {
    pub status: &'static str,
    pub message: &'static str,
    pub meta: M,
    pub data: D,
}

impl<M, D> SuccessResponse<M, D> {
    pub fn new(meta: M, data: D) -> Self {
        Self {
            status: "success",
            message: "Search processed successfully",
            meta,
            data,
        }
    }
}

/// Metadata describing how the phrase was interpreted and which page was returned.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMeta {
    /// The phrase as sent by the client.
    pub query: String,
    /// Qualifier query forwarded to GitHub.
    pub query_interpreted: String,
    pub total_count: u64,
    pub incomplete_results: bool,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    pub account_type: AccountType,
    pub score: f64,
}

impl From<UserHit> for UserResponse {
    fn from(user: UserHit) -> Self {
        Self {
            login: user.login,
            id: user.id,
            avatar_url: user.avatar_url,
            html_url: user.html_url,
            account_type: user.account_type,
            score: user.score,
        }
    }
}

pub type SearchResponse = SuccessResponse<SearchMeta, Vec<UserResponse>>;

impl SearchResponse {
    pub fn from_outcome(query: String, outcome: SearchOutcome) -> Self {
        let meta = SearchMeta {
            query,
            query_interpreted: outcome.query_interpreted.into_inner(),
            total_count: outcome.results.total_count,
            incomplete_results: outcome.results.incomplete_results,
            page: outcome.page,
            limit: outcome.per_page,
        };
        let data = outcome
            .results
            .items
            .into_iter()
            .map(UserResponse::from)
            .collect();

        Self::new(meta, data)
    }
}
