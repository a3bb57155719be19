//! Search service tying phrase interpretation to the search backend.

use tracing::instrument;

use super::parser::interpret;
use super::qualifier::assemble;
use super::traits::{Result, UserSearchProvider};
use super::types::{AssembledSearch, SearchOutcome};

/// Configuration for the search service.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Results per page when the caller does not ask for a limit
    pub default_limit: u32,
    /// Maximum number of results per page allowed
    pub max_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

/// Search service that interprets phrases and forwards the assembled query to a provider.
///
/// # Type Parameters
///
/// * `P` - UserSearchProvider implementation executing the qualifier query
///
/// # Examples
///
/// ```ignore
/// let service = UserSearchService::new(provider, SearchConfig::default());
/// let outcome = service.search("rust developers in Berlin", None, None).await?;
/// println!("{}", outcome.query_interpreted);
/// ```
pub struct UserSearchService<P>
where
    P: UserSearchProvider,
{
    provider: P,
    config: SearchConfig,
}

impl<P> UserSearchService<P>
where
    P: UserSearchProvider,
{
    /// Create a new search service.
    pub fn new(provider: P, config: SearchConfig) -> Self {
        Self { provider, config }
    }

    /// Create a search service with default configuration.
    #[cfg(test)]
    pub fn with_defaults(provider: P) -> Self {
        Self::new(provider, SearchConfig::default())
    }

    /// Execute a search phrase.
    ///
    /// Interprets the phrase, assembles the qualifier query and runs it against the provider.
    /// An empty interpretation is rejected before any backend call.
    ///
    /// # Arguments
    ///
    /// * `phrase` - Natural language description of the users to find
    /// * `limit` - Results per page (None uses default, clamped to `1..=max_limit`)
    /// * `page` - 1-based page number (None means the first page)
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        phrase: &str,
        limit: Option<u32>,
        page: Option<u32>,
    ) -> Result<SearchOutcome> {
        let intent = interpret(phrase);
        let query = assemble(&intent)?;
        tracing::info!(query = %query, "Interpreted search phrase");

        let per_page = limit
            .unwrap_or(self.config.default_limit)
            .clamp(1, self.config.max_limit.max(1));
        let page = page.unwrap_or(1).max(1);

        let request = AssembledSearch {
            query: query.clone(),
            per_page,
            page,
        };
        let results = self.provider.search_users(&request).await?;

        Ok(SearchOutcome {
            intent,
            query_interpreted: query,
            page,
            per_page,
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::provider::MockUserSearchProvider;
    use crate::domain::search::traits::SearchError;
    use crate::domain::search::types::{AccountType, SearchPage, UserHit};

    fn make_user(login: &str, account_type: AccountType) -> UserHit {
        UserHit {
            login: login.to_string(),
            id: 1,
            avatar_url: format!("https://avatars.githubusercontent.com/{login}"),
            html_url: format!("https://github.com/{login}"),
            account_type,
            score: 1.0,
        }
    }

    #[tokio::test]
    async fn search_forwards_assembled_query() {
        let provider = MockUserSearchProvider::returning(SearchPage {
            total_count: 1,
            incomplete_results: false,
            items: vec![make_user("octocat", AccountType::User)],
        });
        let service = UserSearchService::with_defaults(provider.clone());

        let outcome = service
            .search("developer in Berlin with more than 50 followers", None, None)
            .await
            .unwrap();

        assert_eq!(
            outcome.query_interpreted.as_str(),
            "location:berlin followers:>50 type:user"
        );
        assert_eq!(outcome.results.items.len(), 1);
        assert_eq!(outcome.intent.location.as_deref(), Some("berlin"));

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, outcome.query_interpreted);
        assert_eq!(requests[0].per_page, 10);
        assert_eq!(requests[0].page, 1);
    }

    #[tokio::test]
    async fn empty_phrase_never_reaches_provider() {
        let provider = MockUserSearchProvider::default();
        let service = UserSearchService::with_defaults(provider.clone());

        let err = service.search("", None, None).await.unwrap_err();
        assert_eq!(err, SearchError::EmptyQuery);

        let err = service.search(" .,+ ", Some(5), None).await.unwrap_err();
        assert_eq!(err, SearchError::EmptyQuery);

        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn pagination_is_clamped() {
        let provider = MockUserSearchProvider::default();
        let service = UserSearchService::new(
            provider.clone(),
            SearchConfig {
                default_limit: 20,
                max_limit: 50,
            },
        );

        service.search("rust", Some(500), Some(0)).await.unwrap();
        service.search("rust", Some(0), Some(3)).await.unwrap();
        service.search("rust", None, None).await.unwrap();

        let requests = provider.requests();
        assert_eq!((requests[0].per_page, requests[0].page), (50, 1));
        assert_eq!((requests[1].per_page, requests[1].page), (1, 3));
        assert_eq!((requests[2].per_page, requests[2].page), (20, 1));
    }

    #[tokio::test]
    async fn provider_errors_propagate() {
        let provider = MockUserSearchProvider::failing(SearchError::Upstream {
            status: 422,
            reason: "Unprocessable Entity".to_string(),
            message: "Validation Failed".to_string(),
        });
        let service = UserSearchService::with_defaults(provider);

        let err = service.search("rust", None, None).await.unwrap_err();
        assert!(matches!(err, SearchError::Upstream { status: 422, .. }));
    }

    #[tokio::test]
    async fn outcome_echoes_pagination() {
        let provider = MockUserSearchProvider::default();
        let service = UserSearchService::with_defaults(provider);

        let outcome = service
            .search("sponsored organization", Some(25), Some(2))
            .await
            .unwrap();
        assert_eq!(outcome.per_page, 25);
        assert_eq!(outcome.page, 2);
        assert_eq!(outcome.query_interpreted.as_str(), "in:sponsorable type:org");
    }
}
