use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{app_state::AppState, routes::ApiError};

use super::Claims;

/// A custom Axum extractor that verifies the request's bearer token.
///
/// Returns 401 Unauthorized when the `Authorization` header is missing or the token does not
/// verify. When authentication is disabled in the settings, every request is let through and
/// `claims` is `None`.
#[derive(Debug, Clone)]
pub struct Authenticated {
    #[allow(dead_code)]
    pub claims: Option<Claims>,
}

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(verifier) = state.token_verifier() else {
            return Ok(Authenticated { claims: None });
        };

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let claims = verifier.verify_header(header).map_err(|err| {
            tracing::warn!("Rejected request to {}: {}", parts.uri.path(), err);
            ApiError::from(err)
        })?;

        Ok(Authenticated {
            claims: Some(claims),
        })
    }
}
