// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Attendance, vacation, feedback and form handlers.
//!
//! These endpoints proxy the directory sheets the portal pages render.
//! Reads degrade to an empty list when the directory is down; writes
//! surface the failure so the page can tell the member to retry.

use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::Value;

use portal_core::AccessRule;
use portal_directory::Resource;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{CurrentPrincipal, ValidatedJson};
use crate::response::ApiResponse;
use crate::state::AppState;

// =============================================================================
// Attendance
// =============================================================================

/// Query parameters for the attendance listing.
#[derive(Debug, Default, Deserialize)]
pub struct AttendanceQuery {
    /// Department to list. Defaults to the member's own department.
    pub department: Option<String>,
}

/// `GET /api/v1/attendance`
///
/// Every member sees their own department's sheet; switching to another
/// department is reserved for the vp and the president.
pub async fn list_attendance(
    State(state): State<AppState>,
    CurrentPrincipal(member): CurrentPrincipal,
    Query(query): Query<AttendanceQuery>,
) -> ApiResult<ApiResponse<Vec<Value>>> {
    let department = match query.department {
        Some(dept) => {
            if !dept.eq_ignore_ascii_case(&member.department)
                && !AccessRule::leadership().evaluate(&member)
            {
                return Err(ApiError::access_denied());
            }
            dept
        }
        None => member.department,
    };

    let rows = state
        .directory
        .fetch_all_or_empty(Resource::Attendance)
        .await
        .into_iter()
        .filter(|row| {
            // Rows without a department column stay visible to everyone.
            row.get("department")
                .and_then(Value::as_str)
                .map_or(true, |d| d.eq_ignore_ascii_case(&department))
        })
        .collect();

    Ok(ApiResponse::success(rows))
}

/// `POST /api/v1/attendance` (directors and above)
pub async fn create_attendance(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<Value>,
) -> ApiResult<ApiResponse<()>> {
    state.directory.create(Resource::Attendance, body).await?;
    Ok(ApiResponse::success(()))
}

/// `POST /api/v1/attendance/record` (directors and above)
///
/// The attendance matrix lives on the member record itself, so ticking a
/// checkbox is an update of that member's `attendance` column.
pub async fn record_attendance(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<Value>,
) -> ApiResult<ApiResponse<()>> {
    state.directory.update(Resource::Members, body).await?;
    Ok(ApiResponse::success(()))
}

// =============================================================================
// Vacations
// =============================================================================

/// `GET /api/v1/vacations`
pub async fn list_vacations(State(state): State<AppState>) -> ApiResponse<Vec<Value>> {
    ApiResponse::success(state.directory.fetch_all_or_empty(Resource::Vacations).await)
}

/// `POST /api/v1/vacations`
///
/// The request is always filed for the signed-in member; whatever e-mail
/// the body carries is overwritten.
pub async fn create_vacation(
    State(state): State<AppState>,
    CurrentPrincipal(member): CurrentPrincipal,
    ValidatedJson(mut body): ValidatedJson<Value>,
) -> ApiResult<ApiResponse<()>> {
    if let Value::Object(fields) = &mut body {
        fields.insert("email".to_string(), Value::String(member.email));
    }
    state.directory.create(Resource::Vacations, body).await?;
    Ok(ApiResponse::success(()))
}

// =============================================================================
// Feedback
// =============================================================================

/// `GET /api/v1/feedback` (people management only)
pub async fn list_feedback(State(state): State<AppState>) -> ApiResponse<Vec<Value>> {
    ApiResponse::success(state.directory.fetch_all_or_empty(Resource::Feedback).await)
}

/// `POST /api/v1/feedback`
///
/// Any member may send feedback; only people management reads it.
pub async fn create_feedback(
    State(state): State<AppState>,
    CurrentPrincipal(member): CurrentPrincipal,
    ValidatedJson(mut body): ValidatedJson<Value>,
) -> ApiResult<ApiResponse<()>> {
    if let Value::Object(fields) = &mut body {
        fields.insert("email".to_string(), Value::String(member.email));
    }
    state.directory.create(Resource::Feedback, body).await?;
    Ok(ApiResponse::success(()))
}

// =============================================================================
// Forms
// =============================================================================

/// `GET /api/v1/forms`
pub async fn list_forms(State(state): State<AppState>) -> ApiResponse<Vec<Value>> {
    ApiResponse::success(state.directory.fetch_all_or_empty(Resource::Forms).await)
}

/// `POST /api/v1/forms` (people management only)
pub async fn create_form(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<Value>,
) -> ApiResult<ApiResponse<()>> {
    state.directory.create(Resource::Forms, body).await?;
    Ok(ApiResponse::success(()))
}

/// `PATCH /api/v1/forms` (people management only)
pub async fn update_form(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<Value>,
) -> ApiResult<ApiResponse<()>> {
    state.directory.update(Resource::Forms, body).await?;
    Ok(ApiResponse::success(()))
}
