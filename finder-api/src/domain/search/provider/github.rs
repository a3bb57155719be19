//! GitHub-backed provider using the `github-search` client.

use async_trait::async_trait;
use github_search::{GithubClient, GithubFetchError, GithubUser, UserSearchParams};

use crate::domain::search::traits::{Result, SearchError, UserSearchProvider};
use crate::domain::search::types::{AccountType, AssembledSearch, SearchPage, UserHit};

/// Provider implementation running queries against the GitHub REST API.
#[derive(Clone)]
pub struct GithubUserSearchProvider {
    client: GithubClient,
}

impl GithubUserSearchProvider {
    pub fn new(client: GithubClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserSearchProvider for GithubUserSearchProvider {
    async fn search_users(&self, request: &AssembledSearch) -> Result<SearchPage> {
        let params = UserSearchParams::new(request.query.as_str())
            .with_per_page(request.per_page)
            .with_page(request.page);

        let response = self.client.search_users(&params).await.map_err(|e| {
            tracing::error!("GitHub user search failed: {}", e);
            SearchError::from(e)
        })?;

        Ok(SearchPage {
            total_count: response.total_count,
            incomplete_results: response.incomplete_results,
            items: response.items.into_iter().map(to_user_hit).collect(),
        })
    }
}

fn to_user_hit(user: GithubUser) -> UserHit {
    let account_type = if user.account_type.eq_ignore_ascii_case("organization") {
        AccountType::Org
    } else {
        AccountType::User
    };

    UserHit {
        login: user.login,
        id: user.id,
        avatar_url: user.avatar_url,
        html_url: user.html_url,
        account_type,
        score: user.score,
    }
}

impl From<GithubFetchError> for SearchError {
    fn from(e: GithubFetchError) -> Self {
        match e {
            GithubFetchError::RateLimited { reset_at } => SearchError::RateLimited { reset_at },
            GithubFetchError::Status {
                status,
                reason,
                message,
            } => SearchError::Upstream {
                status,
                reason,
                message,
            },
            GithubFetchError::ResponseError(msg) => SearchError::Transport(msg),
            GithubFetchError::ParsingError(msg) => SearchError::Parsing(msg),
            GithubFetchError::InvalidUrl(msg) | GithubFetchError::Other(msg) => {
                SearchError::Transport(msg)
            }
        }
    }
}
