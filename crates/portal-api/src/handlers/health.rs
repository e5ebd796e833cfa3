// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Health check handler.

use crate::response::{ApiResponse, HealthResponse};

/// `GET /health`
pub async fn health() -> ApiResponse<HealthResponse> {
    ApiResponse::success(HealthResponse::healthy())
}
