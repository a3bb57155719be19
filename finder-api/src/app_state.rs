use std::sync::Arc;

use github_search::{GithubClient, GithubFetchError};

use crate::{
    auth::TokenVerifier,
    config::Settings,
    domain::search::{provider::GithubUserSearchProvider, UserSearchProvider, UserSearchService},
};

pub type DynUserSearchService = UserSearchService<Arc<dyn UserSearchProvider>>;

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("Failed to create GitHub client: {0}")]
    GithubClient(#[from] GithubFetchError),
    #[error("auth.secret must be set unless application.disable_auth is true")]
    MissingAuthSecret,
}

#[derive(Clone)]
pub struct AppState {
    search_service: Arc<DynUserSearchService>,
    token_verifier: Option<Arc<TokenVerifier>>,
}

impl AppState {
    pub fn new(search_service: DynUserSearchService, token_verifier: Option<TokenVerifier>) -> Self {
        Self {
            search_service: Arc::new(search_service),
            token_verifier: token_verifier.map(Arc::new),
        }
    }

    /// Wires the GitHub-backed search service and the token verifier from the settings.
    pub fn from_settings(config: &Settings) -> Result<Self, AppStateError> {
        let client = GithubClient::new(config.github.client_options())?;
        if config.github.token.as_deref().unwrap_or_default().is_empty() {
            tracing::warn!("No GitHub token configured, requests are subject to anonymous rate limits");
        }

        let provider: Arc<dyn UserSearchProvider> = Arc::new(GithubUserSearchProvider::new(client));
        let search_service = UserSearchService::new(provider, (&config.search).into());

        let token_verifier = if config.application.disable_auth {
            tracing::warn!("Authentication is disabled");
            None
        } else {
            let secret = config
                .auth
                .secret
                .as_deref()
                .filter(|s| !s.is_empty())
                .ok_or(AppStateError::MissingAuthSecret)?;
            Some(TokenVerifier::new(secret))
        };

        Ok(Self::new(search_service, token_verifier))
    }

    pub fn search_service(&self) -> &DynUserSearchService {
        &self.search_service
    }

    pub fn token_verifier(&self) -> Option<&TokenVerifier> {
        self.token_verifier.as_deref()
    }
}
