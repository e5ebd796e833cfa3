// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # portal-core
//!
//! Shared domain types for the InfoBio member portal backend.
//!
//! This crate provides the foundational types used across all portal
//! components:
//!
//! - **Principal**: the authenticated member and the role hierarchy
//! - **Rule**: declarative access rules and the pure RBAC evaluator
//! - **Error**: unified error hierarchy with localized user messages
//!
//! ## Example
//!
//! ```rust,ignore
//! use portal_core::{AccessRule, Principal, Role};
//!
//! let rule = AccessRule::roles(["director"]).with_department("Projects");
//! let granted = rule.evaluate(&principal);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod principal;
pub mod rule;

pub use error::{
    ApiError, AuthError, ConfigError, DirectoryError, PortalError,
    ApiResult, AuthResult, ConfigResult, DirectoryResult, PortalResult,
};
pub use principal::{ActiveStatusSet, Principal, Role};
pub use rule::AccessRule;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
