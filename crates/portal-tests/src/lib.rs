// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Portal Integration Tests
//!
//! This crate provides integration tests for the InfoBio member portal
//! backend. It includes test utilities, fixtures, and helpers.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities, fixtures, and helpers
//!   - `fixtures`: Pre-built members, directories and identity tokens
//!   - `builders`: Builder patterns for constructing test objects
//!   - `harness`: An in-process router harness for end-to-end requests
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p portal-tests
//!
//! # Run specific test suite
//! cargo test -p portal-tests --test integration_core
//! cargo test -p portal-tests --test integration_auth
//! cargo test -p portal-tests --test integration_api
//! ```
//!
//! ## Test Categories
//!
//! ### Core Tests (`integration_core.rs`)
//! - Role parsing and the privilege hierarchy
//! - Access rule evaluation
//! - Active status matching
//!
//! ### Auth Tests (`integration_auth.rs`)
//! - Identity assertion decoding
//! - The sign-in verification pipeline
//! - Session lifecycle and corruption handling
//!
//! ### API Tests (`integration_api.rs`)
//! - The full sign-in flow over the router
//! - Session-gated and role-gated endpoints
//! - Directory outage behavior

pub mod common;
