// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Unified error hierarchy for the portal backend.
//!
//! This module defines the error type system shared by every portal
//! component:
//!
//! - Separates denial (the caller is not allowed) from infrastructure
//!   failure (the system could not decide)
//! - Distinguishes between retryable and non-retryable errors
//! - Maps errors to appropriate HTTP status codes
//! - Carries localized (pt-BR) user messages alongside log messages
//!
//! # Error Hierarchy
//!
//! ```text
//! PortalError (root)
//! ├── AuthError       - Sign-in verification and session failures
//! ├── DirectoryError  - Member directory (spreadsheet API) failures
//! ├── ConfigError     - Configuration parsing and validation
//! └── ApiError        - REST API errors
//! ```
//!
//! # Examples
//!
//! ```
//! use portal_core::error::{PortalError, DirectoryError};
//!
//! let error = DirectoryError::http("connection refused");
//! assert!(error.is_retryable());
//!
//! let portal_error: PortalError = error.into();
//! assert!(portal_error.is_retryable());
//! ```

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// PortalError - Root Error Type
// =============================================================================

/// The root error type for the portal backend.
///
/// All errors in the portal can be converted to this type, providing a
/// unified error handling interface across the entire system.
#[derive(Debug, Error)]
pub enum PortalError {
    /// Authentication or session error.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Member directory error.
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// API error.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

impl PortalError {
    /// Returns `true` if this error is retryable.
    ///
    /// Only infrastructure failures are retryable. A verification denial
    /// never is: retrying with the same identity yields the same answer.
    pub fn is_retryable(&self) -> bool {
        match self {
            PortalError::Directory(e) => e.is_retryable(),
            PortalError::Api(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Returns a user-friendly error message.
    ///
    /// This message is suitable for display to end users and avoids
    /// exposing internal implementation details.
    pub fn user_message(&self) -> String {
        match self {
            PortalError::Auth(e) => e.user_message(),
            PortalError::Directory(e) => e.user_message(),
            PortalError::Config(e) => format!("Erro de configuração: {}", e.user_message()),
            PortalError::Api(e) => e.user_message(),
        }
    }

    /// Returns the error type as a string for logging/metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            PortalError::Auth(_) => "auth",
            PortalError::Directory(_) => "directory",
            PortalError::Config(_) => "config",
            PortalError::Api(_) => "api",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            PortalError::Auth(e) => e.status_code(),
            PortalError::Directory(e) => e.status_code(),
            PortalError::Config(_) => 400,
            PortalError::Api(e) => e.status_code(),
        }
    }
}

// =============================================================================
// AuthError
// =============================================================================

/// Authentication and session errors.
///
/// The verification variants (`UnverifiedEmail`, `DomainNotAllowed`,
/// `NotAMember`) are denials: the identity was understood and rejected.
/// They carry a stable machine code and a pt-BR message so the sign-in
/// page can show the member exactly why they were turned away. An inactive
/// record is the same denial as no record at all (`NotAMember`).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    /// The identity provider did not verify the e-mail address.
    #[error("E-mail not verified by the identity provider: {email}")]
    UnverifiedEmail {
        /// The unverified e-mail address.
        email: String,
    },

    /// The e-mail domain is not the organization's domain.
    #[error("E-mail domain not allowed: {email}")]
    DomainNotAllowed {
        /// The rejected e-mail address.
        email: String,
        /// The domain that is allowed.
        allowed_domain: String,
    },

    /// The e-mail has the right domain but matches no active member record.
    #[error("No active member record for: {email}")]
    NotAMember {
        /// The e-mail that matched no record.
        email: String,
    },

    /// The identity assertion could not be decoded.
    #[error("Invalid identity assertion: {message}")]
    InvalidAssertion {
        /// Error message.
        message: String,
    },

    /// The assertion issuer is not in the allow-list.
    #[error("Untrusted assertion issuer: {issuer}")]
    UntrustedIssuer {
        /// The issuer that was rejected.
        issuer: String,
    },

    /// No session, or the stored session could not be read back.
    ///
    /// A malformed stored session is indistinguishable from no session:
    /// callers must treat both as "signed out", never as an error page.
    #[error("No valid session")]
    NoSession,

    /// The session exists but the principal does not satisfy the rule.
    #[error("Access denied")]
    AccessDenied,
}

impl AuthError {
    /// Creates an unverified e-mail error.
    pub fn unverified_email(email: impl Into<String>) -> Self {
        Self::UnverifiedEmail { email: email.into() }
    }

    /// Creates a domain not allowed error.
    pub fn domain_not_allowed(email: impl Into<String>, allowed_domain: impl Into<String>) -> Self {
        Self::DomainNotAllowed {
            email: email.into(),
            allowed_domain: allowed_domain.into(),
        }
    }

    /// Creates a not-a-member error.
    pub fn not_a_member(email: impl Into<String>) -> Self {
        Self::NotAMember { email: email.into() }
    }

    /// Creates an invalid assertion error.
    pub fn invalid_assertion(message: impl Into<String>) -> Self {
        Self::InvalidAssertion { message: message.into() }
    }

    /// Creates an untrusted issuer error.
    pub fn untrusted_issuer(issuer: impl Into<String>) -> Self {
        Self::UntrustedIssuer { issuer: issuer.into() }
    }

    /// Returns a stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::UnverifiedEmail { .. } => "UNVERIFIED_EMAIL",
            AuthError::DomainNotAllowed { .. } => "DOMAIN_NOT_ALLOWED",
            AuthError::NotAMember { .. } => "NOT_A_MEMBER",
            AuthError::InvalidAssertion { .. } => "INVALID_ASSERTION",
            AuthError::UntrustedIssuer { .. } => "UNTRUSTED_ISSUER",
            AuthError::NoSession => "NO_SESSION",
            AuthError::AccessDenied => "ACCESS_DENIED",
        }
    }

    /// Returns the error type for logging/metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            AuthError::UnverifiedEmail { .. } => "unverified_email",
            AuthError::DomainNotAllowed { .. } => "domain_not_allowed",
            AuthError::NotAMember { .. } => "not_a_member",
            AuthError::InvalidAssertion { .. } => "invalid_assertion",
            AuthError::UntrustedIssuer { .. } => "untrusted_issuer",
            AuthError::NoSession => "no_session",
            AuthError::AccessDenied => "access_denied",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::NoSession => 401,
            AuthError::AccessDenied => 403,
            AuthError::InvalidAssertion { .. } | AuthError::UntrustedIssuer { .. } => 401,
            _ => 403,
        }
    }

    /// Returns a user-friendly error message (pt-BR).
    pub fn user_message(&self) -> String {
        match self {
            AuthError::UnverifiedEmail { .. } => {
                "Seu e-mail não foi verificado pelo provedor de login.".to_string()
            }
            AuthError::DomainNotAllowed { allowed_domain, .. } => {
                format!("Use sua conta @{} para entrar.", allowed_domain)
            }
            AuthError::NotAMember { .. } => {
                "Seu e-mail não corresponde a nenhum membro ativo. Fale com Gente & Gestão."
                    .to_string()
            }
            AuthError::InvalidAssertion { .. } | AuthError::UntrustedIssuer { .. } => {
                "Não foi possível validar seu login. Tente novamente.".to_string()
            }
            AuthError::NoSession => "Faça login para continuar.".to_string(),
            AuthError::AccessDenied => "Você não tem permissão para acessar esta área.".to_string(),
        }
    }
}

// =============================================================================
// DirectoryError
// =============================================================================

/// Member directory (spreadsheet web API) errors.
///
/// All variants are infrastructure failures, not denials: when the
/// directory cannot answer, the verifier must NOT conclude that an identity
/// is invalid.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// HTTP transport failure reaching the directory endpoint.
    #[error("Directory request failed: {message}")]
    Http {
        /// Error message.
        message: String,
        /// Underlying error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The response body was not the expected envelope.
    #[error("Invalid directory response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },

    /// The directory answered with a non-truthy `ok` flag.
    #[error("Directory rejected the request: {message}")]
    Rejected {
        /// The error message from the envelope, if any.
        message: String,
    },

    /// Unknown resource name.
    #[error("Unknown directory resource: {resource}")]
    UnknownResource {
        /// The resource name.
        resource: String,
    },
}

impl DirectoryError {
    /// Creates an HTTP transport error.
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an HTTP transport error with a source.
    pub fn http_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Http {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse { message: message.into() }
    }

    /// Creates a rejected error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected { message: message.into() }
    }

    /// Creates an unknown resource error.
    pub fn unknown_resource(resource: impl Into<String>) -> Self {
        Self::UnknownResource { resource: resource.into() }
    }

    /// Returns `true` if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DirectoryError::Http { .. })
    }

    /// Returns the error type for logging/metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            DirectoryError::Http { .. } => "http",
            DirectoryError::InvalidResponse { .. } => "invalid_response",
            DirectoryError::Rejected { .. } => "rejected",
            DirectoryError::UnknownResource { .. } => "unknown_resource",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            DirectoryError::Http { .. } => 503,
            DirectoryError::InvalidResponse { .. } => 502,
            DirectoryError::Rejected { .. } => 502,
            DirectoryError::UnknownResource { .. } => 400,
        }
    }

    /// Returns a user-friendly error message (pt-BR).
    pub fn user_message(&self) -> String {
        match self {
            DirectoryError::UnknownResource { resource } => {
                format!("Recurso desconhecido: {}", resource)
            }
            _ => "Não foi possível verificar seu cadastro agora. Tente novamente em instantes."
                .to_string(),
        }
    }
}

impl Clone for DirectoryError {
    fn clone(&self) -> Self {
        match self {
            DirectoryError::Http { message, .. } => DirectoryError::Http {
                message: message.clone(),
                source: None,
            },
            DirectoryError::InvalidResponse { message } => {
                DirectoryError::InvalidResponse { message: message.clone() }
            }
            DirectoryError::Rejected { message } => {
                DirectoryError::Rejected { message: message.clone() }
            }
            DirectoryError::UnknownResource { resource } => {
                DirectoryError::UnknownResource { resource: resource.clone() }
            }
        }
    }
}

// =============================================================================
// ConfigError
// =============================================================================

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse config file '{path}': {message}")]
    Parse {
        /// Path to the configuration file.
        path: PathBuf,
        /// Error message.
        message: String,
        /// Underlying parser error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation failed.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// Required field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// File I/O error.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Creates a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField { field: field.into() }
    }

    /// Creates a parse error.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Returns a user-friendly error message (pt-BR).
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::Parse { path, message, .. } => {
                format!("falha ao ler '{}': {}", path.display(), message)
            }
            ConfigError::Validation { field, message } => {
                format!("campo '{}' inválido: {}", field, message)
            }
            ConfigError::MissingField { field } => {
                format!("campo obrigatório ausente: {}", field)
            }
            ConfigError::Io { path, .. } => {
                format!("falha ao abrir '{}'", path.display())
            }
        }
    }
}

// =============================================================================
// ApiError
// =============================================================================

/// REST API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("Resource not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Bad request.
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Validation error.
    #[error("Validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },

    /// Internal server error.
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
        /// Underlying error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
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
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an internal error with a source.
    pub fn internal_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns `true` if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Internal { .. })
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound { .. } => 404,
            ApiError::BadRequest { .. } => 400,
            ApiError::Validation { .. } => 422,
            ApiError::Internal { .. } => 500,
        }
    }

    /// Returns a user-friendly error message (pt-BR).
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotFound { resource } => format!("Não encontrado: {}", resource),
            ApiError::BadRequest { message } => message.clone(),
            ApiError::Validation { message } => format!("Dados inválidos: {}", message),
            ApiError::Internal { .. } => "Ocorreu um erro interno. Tente novamente.".to_string(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// A Result type with PortalError.
pub type PortalResult<T> = Result<T, PortalError>;

/// A Result type with AuthError.
pub type AuthResult<T> = Result<T, AuthError>;

/// A Result type with DirectoryError.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// A Result type with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A Result type with ApiError.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Tests
// =============================================================================
