//! Trait definitions for search domain abstractions.
//!
//! These traits enable dependency injection and easy testing through mocking.

use std::sync::Arc;

use async_trait::async_trait;

use super::types::{AssembledSearch, SearchPage};

/// Error type for search operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The phrase produced neither facets nor free text.
    #[error("At least one search criteria (query) must be provided")]
    EmptyQuery,

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Upstream {
        status: u16,
        reason: String,
        message: String,
    },

    #[error("Search backend rate limit exceeded")]
    RateLimited { reset_at: Option<u64> },

    #[error("Search backend unreachable: {0}")]
    Transport(String),

    #[error("Unexpected search backend response: {0}")]
    Parsing(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Trait for the external user search backend.
///
/// Receives the assembled qualifier query as-is; pagination and rate limiting are the
/// backend's concern.
#[async_trait]
pub trait UserSearchProvider: Send + Sync {
    async fn search_users(&self, request: &AssembledSearch) -> Result<SearchPage>;
}

#[async_trait]
impl<T: UserSearchProvider + ?Sized> UserSearchProvider for Arc<T> {
    async fn search_users(&self, request: &AssembledSearch) -> Result<SearchPage> {
        (**self).search_users(request).await
    }
}
