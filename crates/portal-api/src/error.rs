// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API error types and HTTP mapping.
//!
//! Handler-facing errors that convert into JSON error responses. Denials
//! carry the verifier's stable code so the sign-in page can tell the member
//! exactly why they were turned away; infrastructure failures surface as
//! 503 so the page offers a retry instead of a denial.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use portal_core::error::{AuthError, DirectoryError};

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// ApiError
// =============================================================================

/// API error type with HTTP status code mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404).
    #[error("Resource not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Bad request (400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Validation error (422).
    #[error("Validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },

    /// Authentication or authorization failure (401/403).
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// The member directory could not answer (502/503).
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Internal server error (500).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message (for logging, not user-facing).
        message: String,
    },
}

impl ApiError {
    /// Creates a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Creates an unauthenticated error.
    pub fn no_session() -> Self {
        Self::Auth(AuthError::NoSession)
    }

    /// Creates an access denied error.
    pub fn access_denied() -> Self {
        Self::Auth(AuthError::AccessDenied)
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Auth(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::FORBIDDEN)
            }
            ApiError::Directory(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::SERVICE_UNAVAILABLE)
            }
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for categorization.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::Auth(e) => e.code(),
            ApiError::Directory(_) => "DIRECTORY_UNAVAILABLE",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Returns a user-friendly error message (pt-BR).
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotFound { resource } => format!("Não encontrado: {}", resource),
            ApiError::BadRequest { message } => message.clone(),
            ApiError::Validation { message } => format!("Dados inválidos: {}", message),
            ApiError::Auth(e) => e.user_message(),
            ApiError::Directory(e) => e.user_message(),
            ApiError::Internal { .. } => "Ocorreu um erro interno. Tente novamente.".to_string(),
        }
    }

    /// Returns `true` if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Internal { .. } | ApiError::Directory(_))
    }
}

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.user_message();

        if self.is_server_error() {
            tracing::error!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Client error occurred"
            );
        }

        let body = ErrorResponseBody {
            ok: false,
            error: ErrorDetails {
                code: error_code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Error Response Body
// =============================================================================

/// Error response body structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseBody {
    /// Always `false`; mirrors the envelope the portal pages expect.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

// =============================================================================
// From Implementations
// =============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Invalid JSON: {}", err))
    }
}

impl From<portal_core::PortalError> for ApiError {
    fn from(err: portal_core::PortalError) -> Self {
        use portal_core::PortalError;
        match err {
            PortalError::Auth(e) => ApiError::Auth(e),
            PortalError::Directory(e) => ApiError::Directory(e),
            PortalError::Config(e) => ApiError::internal(e.to_string()),
            PortalError::Api(e) => ApiError::internal(e.to_string()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ApiError::not_found("member").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::no_session().status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::access_denied().status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::from(DirectoryError::http("down")).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_denials_keep_their_codes() {
        let error = ApiError::from(AuthError::not_a_member("x@infobiojr.com.br"));
        assert_eq!(error.error_code(), "NOT_A_MEMBER");
        assert_eq!(error.status_code(), StatusCode::FORBIDDEN);

        let error = ApiError::from(AuthError::domain_not_allowed("x@gmail.com", "infobiojr.com.br"));
        assert_eq!(error.error_code(), "DOMAIN_NOT_ALLOWED");
    }

    #[test]
    fn test_directory_failure_is_server_error() {
        assert!(ApiError::from(DirectoryError::http("down")).is_server_error());
        assert!(!ApiError::no_session().is_server_error());
    }
}
