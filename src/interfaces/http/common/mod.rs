//! Common API DTOs and error mapping

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::shared::DomainError;

/// Standard response envelope.
///
/// All REST endpoints wrap their payload in this shape.
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request completed successfully
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

/// HTTP status for each domain error class.
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::DuplicateEmail(_) | DomainError::DuplicatePhone(_) => StatusCode::CONFLICT,
        DomainError::UnknownRole(_)
        | DomainError::UnsupportedFileType(_)
        | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NoMatchingRoles(_) | DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a domain error into the standard error response.
///
/// Internal failures are logged with their detail and returned with a
/// generic message; raw storage/mail error text never reaches the caller.
pub fn error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = status_for(&err);
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(error = %err, "request failed");
        "Something went wrong, please try again later.".to_string()
    } else {
        err.to_string()
    };
    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_the_taxonomy() {
        assert_eq!(
            status_for(&DomainError::DuplicateEmail("a@b.c".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DomainError::UnknownRole("X".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::NoMatchingRoles("X".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::Forbidden("nope".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&DomainError::Storage("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let (status, Json(body)) =
            error_response::<()>(DomainError::Storage("connection string leak".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.error.unwrap().contains("connection string"));
    }
}
