use std::fmt::Display;

use url::Url;

use crate::GithubFetchError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct GithubURL(Url);

impl AsRef<str> for GithubURL {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl GithubURL {
    /// Parses the API base URL, e.g. `https://api.github.com` or a GitHub Enterprise host.
    pub fn new(base: &str) -> Result<Self, GithubFetchError> {
        Url::parse(base)
            .map(Self)
            .map_err(|e| GithubFetchError::InvalidUrl(format!("{}: {}", base, e)))
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let mut url = self.0.clone();
        let trimmed_url = url.path().trim_end_matches('/').to_string();
        let trimmed_path = path.trim_start_matches('/');
        url.set_path(&format!("{}/{}", trimmed_url, trimmed_path));
        Self(url)
    }

    /// Append a percent-encoded query parameter.
    pub fn with_param(&self, key: &str, value: impl Display) -> Self {
        let mut url = self.0.clone();
        url.query_pairs_mut().append_pair(key, &value.to_string());
        Self(url)
    }
}
