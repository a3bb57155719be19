//! Mock search provider for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::search::traits::{Result, SearchError, UserSearchProvider};
use crate::domain::search::types::{AssembledSearch, SearchPage};

/// Mock provider that returns a canned page (or error) and records every request.
///
/// # Examples
///
/// ```ignore
/// let provider = MockUserSearchProvider::returning(SearchPage::default());
/// service.search("rust", None, None).await?;
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockUserSearchProvider {
    error: Arc<Option<SearchError>>,
    page: Arc<SearchPage>,
    requests: Arc<Mutex<Vec<AssembledSearch>>>,
}

impl MockUserSearchProvider {
    /// Create a mock that always returns the given page.
    pub fn returning(page: SearchPage) -> Self {
        Self {
            page: Arc::new(page),
            ..Default::default()
        }
    }

    /// Create a mock that always fails with the given error.
    pub fn failing(error: SearchError) -> Self {
        Self {
            error: Arc::new(Some(error)),
            ..Default::default()
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<AssembledSearch> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl UserSearchProvider for MockUserSearchProvider {
    async fn search_users(&self, request: &AssembledSearch) -> Result<SearchPage> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match self.error.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(self.page.as_ref().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::parser::interpret;
    use crate::domain::search::qualifier::assemble;

    fn request(phrase: &str) -> AssembledSearch {
        AssembledSearch {
            query: assemble(&interpret(phrase)).unwrap(),
            per_page: 10,
            page: 1,
        }
    }

    #[tokio::test]
    async fn mock_returns_page_and_records() {
        let provider = MockUserSearchProvider::returning(SearchPage {
            total_count: 42,
            ..Default::default()
        });

        let page = provider.search_users(&request("rust")).await.unwrap();
        assert_eq!(page.total_count, 42);
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.requests()[0].query.as_str(), "language:rust");
    }

    #[tokio::test]
    async fn mock_failure_still_records() {
        let provider = MockUserSearchProvider::failing(SearchError::Transport("down".into()));

        let err = provider.search_users(&request("go")).await.unwrap_err();
        assert_eq!(err, SearchError::Transport("down".into()));
        assert_eq!(provider.call_count(), 1);
    }
}
