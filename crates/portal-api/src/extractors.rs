// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Custom extractors for API handlers.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use portal_core::Principal;

use crate::error::ApiError;
use crate::middleware::SessionContext;

// =============================================================================
// CurrentPrincipal
// =============================================================================

/// Extractor for the signed-in member.
///
/// Reads the [`Principal`] the session middleware stored in the request
/// extensions. Returns 401 if there is no session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentPrincipal(member): CurrentPrincipal) -> impl IntoResponse {
///     format!("Olá, {}", member.name)
/// }
/// ```
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .and_then(|ctx| ctx.principal.clone())
            .map(CurrentPrincipal)
            .ok_or_else(ApiError::no_session)
    }
}

// =============================================================================
// SessionToken
// =============================================================================

/// Extractor for the raw session id, for handlers that manage the session
/// itself (logout, profile refresh).
pub struct SessionToken(pub Option<String>);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .extensions
            .get::<SessionContext>()
            .and_then(|ctx| ctx.session_id.clone());
        Ok(SessionToken(token))
    }
}

// =============================================================================
// Validated JSON Extractor
// =============================================================================

/// Extractor for validated JSON payloads.
///
/// Extracts and deserializes JSON, returning appropriate errors for
/// malformed input.
pub struct ValidatedJson<T>(pub T);

impl<S, T> axum::extract::FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(
        req: axum::http::Request<axum::body::Body>,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;

        Ok(ValidatedJson(value))
    }
}
