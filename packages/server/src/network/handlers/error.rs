//! Error type for HTTP handlers and its mapping onto status codes.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pokedex_core::StoreError;
use serde_json::json;
use tracing::debug;

/// Errors surfaced by API handlers, rendered as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The `{id}` path segment is not an integer.
    #[error("Invalid ID")]
    InvalidId,
    /// The request body could not be decoded.
    #[error("Invalid request body")]
    InvalidBody,
    /// The query string could not be decoded.
    #[error("Invalid query parameters")]
    InvalidQuery,
    /// A path segment could not be decoded.
    #[error("Invalid path parameter")]
    InvalidPath,
    /// A lookup route was called with an empty parameter segment.
    #[error("{0}")]
    MissingParameter(&'static str),
    /// `DELETE /api/pokemons` without `confirm=true`.
    #[error("Add ?confirm=true to confirm deletion")]
    ConfirmationRequired,
    /// No route matches the path.
    #[error("Not found")]
    RouteNotFound,
    /// The path exists but not for this method.
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId
            | Self::InvalidBody
            | Self::InvalidQuery
            | Self::InvalidPath
            | Self::MissingParameter(_)
            | Self::ConfirmationRequired => StatusCode::BAD_REQUEST,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Store(StoreError::DuplicateKey { .. }) => StatusCode::CONFLICT,
            Self::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection, "rejected request body");
        Self::InvalidBody
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        debug!(error = %rejection, "rejected query string");
        Self::InvalidQuery
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!(error = %rejection, "rejected path parameter");
        Self::InvalidPath
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Router fallback for unknown paths.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Router fallback for known paths called with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Parses the `{id}` path segment.
///
/// # Errors
///
/// Returns [`ApiError::InvalidId`] when the segment is not an `i64`.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_statuses() {
        let duplicate = ApiError::from(StoreError::DuplicateKey {
            num: "001".to_string(),
        });
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(StoreError::NotFound { id: 9 }).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::InvalidInput("Name is required".into())).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn routing_errors_map_to_statuses() {
        assert_eq!(ApiError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::InvalidQuery.status(), StatusCode::BAD_REQUEST);
        let missing = ApiError::MissingParameter("Type parameter required");
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.to_string(), "Type parameter required");
    }

    #[test]
    fn messages_pass_through_from_store() {
        let err = ApiError::from(StoreError::NotFound { id: 3 });
        assert_eq!(err.to_string(), "Pokemon not found");
    }

    #[test]
    fn parse_id_rejects_non_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(ApiError::InvalidId)));
        assert!(matches!(parse_id("1.5"), Err(ApiError::InvalidId)));
    }

    #[tokio::test]
    async fn response_body_carries_error_message() {
        let response = ApiError::ConfirmationRequired.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Add ?confirm=true to confirm deletion");
    }
}
