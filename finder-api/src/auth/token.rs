use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token is required")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
}

/// Claims carried by an accepted bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Verifies HS256-signed bearer tokens against a shared secret.
///
/// `exp` is optional, but an expired token is rejected when it is present.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Accepts `Bearer <token>` as well as the bare token.
    pub fn verify_header(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let raw = header
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let mut parts = raw.splitn(2, char::is_whitespace);
        let token = match (parts.next(), parts.next()) {
            (Some(scheme), rest) if scheme.eq_ignore_ascii_case("bearer") => {
                rest.unwrap_or_default().trim()
            }
            _ => raw,
        };
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        self.verify(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected bearer token: {}", e);
                AuthError::InvalidToken
            })
    }
}

#[cfg(test)]
pub(crate) fn sign(secret: &str, claims: &Claims) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
