//! Request handlers

use crate::error::{DomainScoutError, ErrorKind};
use crate::server::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DomainQuery {
    pub domain: Option<String>,
}

impl DomainQuery {
    /// Unwrap the extractor, turning a malformed query string into a 400
    fn from_extracted(query: Result<Query<Self>, QueryRejection>) -> Result<Self, ApiError> {
        query.map(|Query(query)| query).map_err(|rejection| {
            tracing::debug!(error = %rejection, "Rejected query string");
            ApiError(DomainScoutError::validation("Invalid query parameters"))
        })
    }

    /// The trimmed `domain` parameter, or a 400
    fn require_domain(&self) -> Result<&str, ApiError> {
        match self.domain.as_deref().map(str::trim) {
            Some(domain) if !domain.is_empty() => Ok(domain),
            _ => Err(ApiError(DomainScoutError::validation("Missing domain parameter"))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub domain: String,
    pub available: bool,
    /// `YYYY-MM-DD`
    pub expiration_date: Option<String>,
    pub expires_in: Option<crate::domain::Countdown>,
    pub expires_in_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error wrapper that renders as `{ "error": ... }`
#[derive(Debug)]
pub struct ApiError(pub DomainScoutError);

impl From<DomainScoutError> for ApiError {
    fn from(err: DomainScoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind() {
            ErrorKind::Input => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            error: self.0.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// `GET /check?domain=`
pub async fn check_handler(
    State(state): State<AppState>,
    query: Result<Query<DomainQuery>, QueryRejection>,
) -> Result<Json<CheckResponse>, ApiError> {
    let query = DomainQuery::from_extracted(query)?;
    let domain = query.require_domain()?;
    let verdict = state.evaluator.evaluate(domain).await?;

    Ok(Json(CheckResponse {
        expiration_date: verdict
            .expiration
            .map(|exp| exp.format("%Y-%m-%d").to_string()),
        expires_in_text: verdict.expires_in.map(|c| c.to_string()),
        expires_in: verdict.expires_in,
        available: verdict.available,
        registrar: verdict.registrar,
        domain: verdict.domain,
    }))
}

/// `GET /ai-suggestions?domain=`
pub async fn suggestions_handler(
    State(state): State<AppState>,
    query: Result<Query<DomainQuery>, QueryRejection>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let query = DomainQuery::from_extracted(query)?;
    let domain = query.require_domain()?;
    let set = state.resolver.resolve(domain).await?;

    Ok(Json(SuggestionsResponse {
        suggestions: set.names(),
    }))
}

/// `GET /health`
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: crate::VERSION,
        }),
    )
}
