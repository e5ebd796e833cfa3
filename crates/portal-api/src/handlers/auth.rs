// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Sign-in, sign-out and current-member handlers.

use axum::extract::State;
use serde::Deserialize;

use portal_core::Principal;

use crate::error::ApiResult;
use crate::extractors::{CurrentPrincipal, SessionToken, ValidatedJson};
use crate::response::{ApiResponse, LoginResponse};
use crate::state::AppState;

// =============================================================================
// Login
// =============================================================================

/// Sign-in request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// The identity token from the sign-in widget.
    pub credential: String,
}

/// `POST /api/v1/auth/login`
///
/// Decodes the identity assertion, verifies it against the member directory
/// and opens a session. Denials come back with the verifier's specific code
/// (`UNVERIFIED_EMAIL`, `DOMAIN_NOT_ALLOWED`, `NOT_A_MEMBER`); a directory
/// outage is a 503, inviting a retry rather than turning the member away.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> ApiResult<ApiResponse<LoginResponse>> {
    let assertion = state.decoder.decode(&body.credential)?;
    let principal = state.verifier.verify(&assertion).await?;
    let session_id = state.sessions.create(&principal);

    Ok(ApiResponse::success(LoginResponse {
        session_id,
        member: principal,
    }))
}

// =============================================================================
// Logout
// =============================================================================

/// `POST /api/v1/auth/logout`
///
/// Idempotent: signing out without a session, or with one that no longer
/// resolves, succeeds the same way.
pub async fn logout(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> ApiResponse<()> {
    if let Some(token) = token {
        state.sessions.remove(&token);
    }
    ApiResponse::success(())
}

// =============================================================================
// Current member
// =============================================================================

/// `GET /api/v1/auth/me`
pub async fn current_member(
    CurrentPrincipal(member): CurrentPrincipal,
) -> ApiResponse<Principal> {
    ApiResponse::success(member)
}
