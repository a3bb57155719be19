use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::{
    auth::Authenticated,
    routes::{
        error::ValidationWarning,
        responses::SearchResponse,
        ApiError,
    },
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(search_users))
}

/// Raw body of `POST /search`. Fields stay untyped so every shape error becomes a warning.
#[derive(Debug, Deserialize)]
struct SearchBody {
    query: Option<Value>,
    limit: Option<Value>,
    page: Option<Value>,
}

/// Validated body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchRequest {
    query: String,
    limit: Option<u32>,
    page: Option<u32>,
}

#[instrument(name = "POST /search", skip(app_state, _auth, payload))]
async fn search_users(
    State(app_state): State<AppState>,
    _auth: Authenticated,
    payload: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!("Unreadable search body: {}", rejection);
        ApiError::bad_request("Invalid Request")
            .with_warnings(vec![ValidationWarning::new("body", rejection.body_text())])
    })?;
    let request = validate_search_request(body)?;

    let outcome = app_state
        .search_service()
        .search(&request.query, request.limit, request.page)
        .await?;
    tracing::debug!(intent = ?outcome.intent, "Search finished");

    Ok(Json(SearchResponse::from_outcome(request.query, outcome)))
}

/// Checks the body shape: `{ query: string, limit?: number, page?: number }`.
fn validate_search_request(body: SearchBody) -> Result<SearchRequest, ApiError> {
    let mut warnings = Vec::new();

    let query = match body.query {
        Some(Value::String(query)) => Some(query),
        _ => {
            warnings.push(ValidationWarning::new("query", "query must be string"));
            None
        }
    };
    let limit = optional_count(body.limit.as_ref(), "limit", &mut warnings);
    let page = optional_count(body.page.as_ref(), "page", &mut warnings);

    match query {
        Some(query) if warnings.is_empty() => Ok(SearchRequest { query, limit, page }),
        _ => Err(ApiError::bad_request("Invalid Request").with_warnings(warnings)),
    }
}

fn optional_count(
    value: Option<&Value>,
    param: &str,
    warnings: &mut Vec<ValidationWarning>,
) -> Option<u32> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => match n.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => Some(n),
            None => {
                warnings.push(ValidationWarning::new(
                    param,
                    format!("{param} must be a non-negative integer"),
                ));
                None
            }
        },
        Some(_) => {
            warnings.push(ValidationWarning::new(param, format!("{param} must be number")));
            None
        }
    }
}
