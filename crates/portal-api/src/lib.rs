// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # portal-api
//!
//! HTTP API for the InfoBio member portal: the session gate, the RBAC
//! guards and the resource endpoints the portal pages consume.
//!
//! The flow is:
//!
//! 1. The sign-in page posts an identity assertion to `/api/v1/auth/login`.
//! 2. The [`auth::IdentityVerifier`] checks it against the member directory
//!    and, on success, a server-side session is created.
//! 3. Every other request carries the session id as a bearer token; the
//!    [`middleware::SessionLayer`] resolves it to a
//!    [`portal_core::Principal`].
//! 4. Route-level [`middleware::RequireAccessLayer`] guards evaluate
//!    [`portal_core::AccessRule`]s against that principal.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use response::ApiResponse;
pub use server::{ApiServer, ApiServerBuilder};
pub use state::AppState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
