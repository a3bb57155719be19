use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::{auth::AuthError, domain::search::SearchError};

/// One offending field of a rejected request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub param: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
    code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<ValidationWarning>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    warnings: Vec<ValidationWarning>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<ValidationWarning>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[cfg(test)]
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: "error",
            message: self.message,
            code: self.status.as_u16(),
            warnings: self.warnings,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken => Self::unauthorized(err.to_string()),
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::EmptyQuery => Self::bad_request(err.to_string()),
            SearchError::Upstream {
                status,
                ref reason,
                ref message,
            } => {
                tracing::warn!("Search backend returned {} {}: {}", status, reason, message);
                match StatusCode::from_u16(status) {
                    Ok(code) if code.is_client_error() || code.is_server_error() => {
                        Self::new(code, message.clone())
                    }
                    _ => Self::bad_gateway(message.clone()),
                }
            }
            SearchError::RateLimited { reset_at } => {
                tracing::warn!("Search backend rate limited, resets at {:?}", reset_at);
                Self::new(StatusCode::TOO_MANY_REQUESTS, err.to_string())
            }
            SearchError::Transport(ref e) | SearchError::Parsing(ref e) => {
                tracing::error!("Search backend error: {}", e);
                Self::bad_gateway(err.to_string())
            }
        }
    }
}
