use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT},
    StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::instrument;

use crate::{
    domain::{UserSearchParams, UserSearchResponse},
    GithubURL, DEFAULT_API_URL,
};

const DEFAULT_USER_AGENT: &str = concat!("github-search/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`GithubClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_url: String,
    /// Personal access token. Unauthenticated requests get a much lower rate limit.
    pub token: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: GithubURL,
}

impl GithubClient {
    pub fn new(options: ClientOptions) -> Result<Self, GithubFetchError> {
        let base_url = GithubURL::new(&options.api_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&options.user_agent)
                .map_err(|e| GithubFetchError::Other(format!("Invalid user agent: {}", e)))?,
        );
        if let Some(token) = options.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("token {}", token))
                .map_err(|e| GithubFetchError::Other(format!("Invalid token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(options.timeout)
            .build()
            .map_err(|e| GithubFetchError::Other(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &GithubURL) -> Result<T, GithubFetchError> {
        let resp = self
            .http
            .get(url.as_ref())
            .send()
            .await
            .map_err(|e| GithubFetchError::ResponseError(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let remaining = header_str(resp.headers(), "x-ratelimit-remaining");
            let reset = header_str(resp.headers(), "x-ratelimit-reset");
            let body = resp.text().await.unwrap_or_default();
            return Err(classify_failure(
                status,
                remaining.as_deref(),
                reset.as_deref(),
                &body,
            ));
        }

        resp.json::<T>().await.map_err(|e| {
            GithubFetchError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    /// Runs `GET /search/users` with the given qualifier query.
    #[instrument(skip(self), fields(q = %params.q))]
    pub async fn search_users(
        &self,
        params: &UserSearchParams,
    ) -> Result<UserSearchResponse, GithubFetchError> {
        let url = self
            .base_url
            .append_path("/search/users")
            .with_param("q", &params.q)
            .with_param("per_page", params.per_page)
            .with_param("page", params.page);

        let response: UserSearchResponse = self.fetch(&url).await?;
        tracing::debug!(
            total_count = response.total_count,
            returned = response.items.len(),
            "GitHub user search finished"
        );

        Ok(response)
    }
}

#[derive(Error, Debug)]
pub enum GithubFetchError {
    #[error("Rate limit exceeded")]
    RateLimited { reset_at: Option<u64> },
    #[error("{reason}: {message}")]
    Status {
        status: u16,
        reason: String,
        message: String,
    },
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("InvalidUrl: {0}")]
    InvalidUrl(String),
    #[error("Other: {0}")]
    Other(String),
}

/// Error payload GitHub attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct GithubErrorBody {
    message: String,
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn classify_failure(
    status: StatusCode,
    ratelimit_remaining: Option<&str>,
    ratelimit_reset: Option<&str>,
    body: &str,
) -> GithubFetchError {
    let exhausted = ratelimit_remaining.map(str::trim) == Some("0");
    if status == StatusCode::TOO_MANY_REQUESTS || (status == StatusCode::FORBIDDEN && exhausted) {
        return GithubFetchError::RateLimited {
            reset_at: ratelimit_reset.and_then(|r| r.trim().parse().ok()),
        };
    }

    let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
    let message = serde_json::from_str::<GithubErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| reason.clone());

    GithubFetchError::Status {
        status: status.as_u16(),
        reason,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failure_keeps_github_message() {
        let err = classify_failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            Some("29"),
            None,
            r#"{"message":"Validation Failed","errors":[{"code":"invalid"}]}"#,
        );

        match err {
            GithubFetchError::Status {
                status,
                reason,
                message,
            } => {
                assert_eq!(status, 422);
                assert_eq!(reason, "Unprocessable Entity");
                assert_eq!(message, "Validation Failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn exhausted_quota_is_rate_limited() {
        let err = classify_failure(
            StatusCode::FORBIDDEN,
            Some("0"),
            Some("1735689600"),
            r#"{"message":"API rate limit exceeded"}"#,
        );
        assert!(matches!(
            err,
            GithubFetchError::RateLimited {
                reset_at: Some(1735689600)
            }
        ));

        let err = classify_failure(StatusCode::TOO_MANY_REQUESTS, None, None, "");
        assert!(matches!(err, GithubFetchError::RateLimited { reset_at: None }));
    }

    #[test]
    fn forbidden_with_quota_left_is_plain_status() {
        let err = classify_failure(StatusCode::FORBIDDEN, Some("12"), None, "not json");
        match err {
            GithubFetchError::Status { status, message, .. } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Forbidden");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn client_builds_with_token() {
        let client = GithubClient::new(ClientOptions {
            token: Some("ghp_example".to_string()),
            ..Default::default()
        });
        assert!(client.is_ok());
    }

    #[test]
    fn client_rejects_bad_base_url() {
        let client = GithubClient::new(ClientOptions {
            api_url: "::nope::".to_string(),
            ..Default::default()
        });
        assert!(matches!(client, Err(GithubFetchError::InvalidUrl(_))));
    }
}
