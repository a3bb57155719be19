use serde::Deserialize;

/// GitHub refuses `per_page` values above this.
pub const MAX_PER_PAGE: u32 = 100;
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const DEFAULT_PAGE: u32 = 1;

/// Parameters for `GET /search/users`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSearchParams {
    /// Qualifier query, forwarded as-is as the `q` parameter.
    pub q: String,
    pub per_page: u32,
    pub page: u32,
}

impl UserSearchParams {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            per_page: DEFAULT_PER_PAGE,
            page: DEFAULT_PAGE,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSearchResponse {
    pub total_count: u64,
    pub incomplete_results: bool,
    pub items: Vec<GithubUser>,
}

/// A single hit from the user search endpoint. Only the fields we expose are kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    /// `"User"` or `"Organization"`.
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub score: f64,
}
