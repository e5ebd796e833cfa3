// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Common Test Utilities
//!
//! This module provides shared test utilities, fixtures, and helpers for
//! integration tests.
//!
//! ## Module Structure
//!
//! - `fixtures`: Pre-built members, directories and identity tokens
//! - `builders`: Builder patterns for constructing test objects
//! - `harness`: An in-process router harness for end-to-end requests

pub mod builders;
pub mod fixtures;
pub mod harness;

// Re-exports for convenience
pub use builders::*;
pub use fixtures::*;
pub use harness::*;

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize test logging. Call this at the start of each test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("warn,portal=debug")),
            )
            .with_test_writer()
            .init();
    });
}
