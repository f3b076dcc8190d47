//! Common HTTP types

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard API response wrapper
///
/// Every REST endpoint returns data in this envelope.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; `null` on failure
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Paginated list response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total item count across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn from_result<S>(
        result: crate::shared::PaginatedResult<S>,
        map: impl Fn(S) -> T,
    ) -> Self {
        Self {
            items: result.items.into_iter().map(map).collect(),
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }
}

/// Map a domain error to an HTTP error response.
///
/// Database failures log the full detail server-side and surface only a
/// generic message.
pub fn domain_error_response(e: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let (status, message) = match e {
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, e.to_string()),
        DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        DomainError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        DomainError::Database(detail) => {
            error!("Database failure: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };
    (status, Json(ApiResponse::error(message)))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let resp = ApiResponse::success(42);
        assert!(resp.success);
        assert_eq!(resp.data, Some(42));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn error_statuses_follow_the_taxonomy() {
        let cases = [
            (
                DomainError::not_found("Property", "id", "p-1"),
                StatusCode::NOT_FOUND,
            ),
            (
                DomainError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::Conflict("dup".into()), StatusCode::CONFLICT),
            (
                DomainError::Unauthorized("no token".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                DomainError::Forbidden("not yours".into()),
                StatusCode::FORBIDDEN,
            ),
        ];
        for (err, expected) in cases {
            let (status, _) = domain_error_response(err);
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn database_failure_is_opaque() {
        let (status, Json(body)) =
            domain_error_response(DomainError::Database("password=hunter2".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }
}
