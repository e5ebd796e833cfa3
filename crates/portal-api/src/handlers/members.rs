// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Member roster and profile handlers.

use axum::extract::State;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use portal_core::Principal;
use portal_directory::Resource;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{CurrentPrincipal, SessionToken, ValidatedJson};
use crate::response::ApiResponse;
use crate::state::AppState;

// =============================================================================
// Roster
// =============================================================================

/// `GET /api/v1/members`
///
/// A directory outage degrades to an empty roster; the page renders empty
/// instead of erroring. Access decisions never go through this path.
pub async fn list_members(State(state): State<AppState>) -> ApiResponse<Vec<Value>> {
    ApiResponse::success(state.directory.fetch_all_or_empty(Resource::Members).await)
}

/// `POST /api/v1/members` (people management only)
pub async fn create_member(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<Value>,
) -> ApiResult<ApiResponse<()>> {
    state.directory.create(Resource::Members, body).await?;
    Ok(ApiResponse::success(()))
}

/// `PATCH /api/v1/members` (people management only)
pub async fn update_member(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<Value>,
) -> ApiResult<ApiResponse<()>> {
    state.directory.update(Resource::Members, body).await?;
    Ok(ApiResponse::success(()))
}

// =============================================================================
// Profile
// =============================================================================

/// Profile self-update request. Only the date of birth is member-editable;
/// everything else on the record belongs to people management.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    /// Date of birth, `YYYY-MM-DD`.
    pub dob: String,
}

/// `PATCH /api/v1/me/profile`
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentPrincipal(member): CurrentPrincipal,
    SessionToken(token): SessionToken,
    ValidatedJson(body): ValidatedJson<ProfileUpdateRequest>,
) -> ApiResult<ApiResponse<Principal>> {
    let dob = body.dob.trim();
    NaiveDate::parse_from_str(dob, "%Y-%m-%d")
        .map_err(|_| ApiError::validation("dob must be YYYY-MM-DD"))?;

    state
        .directory
        .update(
            Resource::Members,
            json!({ "email": member.email, "dob": dob }),
        )
        .await?;

    let updated = Principal {
        dob: Some(dob.to_string()),
        ..member
    };
    if let Some(token) = token {
        state.sessions.refresh(&token, &updated);
    }

    Ok(ApiResponse::success(updated))
}
