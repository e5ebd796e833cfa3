// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Tower middleware for the portal API.

pub mod rbac;
pub mod session;

pub use rbac::RequireAccessLayer;
pub use session::{SessionContext, SessionLayer};
